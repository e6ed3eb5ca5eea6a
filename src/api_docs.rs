use utoipa::OpenApi;
use crate::constants;
use crate::controllers::calculator_controller;
use crate::models::{api, currency, finance, impact, lifecycle, panel, payback};

#[derive(OpenApi)]
#[openapi(
    paths(
        calculator_controller::calculate_yield,
        calculator_controller::get_efficiency_curve,
        calculator_controller::get_spectral_response,
        calculator_controller::get_design_optimization,
        calculator_controller::project_finances,
        calculator_controller::list_scenarios,
        calculator_controller::assess_life_cycle,
        calculator_controller::get_convergence_trace,
        calculator_controller::estimate_impact,
        calculator_controller::get_exchange_rate,
        calculator_controller::get_constants,
        calculator_controller::get_offline_mode,
        calculator_controller::set_offline_mode
    ),
    components(
        schemas(
            panel::PanelConfiguration,
            panel::YieldResult,
            panel::EfficiencyPoint,
            panel::SpectralPoint,
            panel::DesignCandidate,
            panel::DesignOptimization,
            payback::Payback,
            payback::BreakEven,
            finance::ScenarioName,
            finance::ScenarioParameters,
            finance::CashFlowYear,
            finance::CashFlowProjection,
            lifecycle::LifeCycleInputs,
            lifecycle::MaterialMasses,
            lifecycle::LifeCycleResult,
            lifecycle::ConvergencePoint,
            impact::SiteInputs,
            impact::ImpactResult,
            currency::Currency,
            currency::ExchangeRate,
            currency::RateSource,
            currency::ExchangeRateStatus,
            constants::ModelConstants,
            api::YieldRequest,
            api::ProjectionRequest,
            api::ProjectionResponse,
            api::OfflineModeRequest,
            api::OfflineModeResponse,
            api::ErrorResponse
        )
    ),
    tags(
        (name = "glass2grid-sim", description = "Smart glass optical, financial and life-cycle calculators")
    )
)]
pub struct ApiDoc;
