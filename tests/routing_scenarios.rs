// End-to-end routing scenarios: catalog -> advisor -> estimator -> planner.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use u_routing::models::{
    Department, OrderContext, PrintMethod, RecommendationTier, RoutingStep, RoutingTemplate,
};
use u_routing::validation::ValidationErrorKind;
use u_routing::{
    logging, Advisor, BasicEstimator, DependencyScheduler, EngineConfig, RoutePlanner,
    RoutingError, TemplateCatalog,
};

// ==========================================
// Helpers
// ==========================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap()
}

/// Six strictly sequential steps: nominal [4,6,8,12,3,2], capacity [50,4,25,8,30,40].
fn six_step_template() -> RoutingTemplate {
    let specs = [
        ("cut", "Cutting", Department::Cutting, 4.0, 50.0),
        ("print", "Printing", Department::Printing, 6.0, 4.0),
        ("cure", "Curing", Department::Finishing, 8.0, 25.0),
        ("sew", "Sewing", Department::Sewing, 12.0, 8.0),
        ("qc", "Inspection", Department::QualityControl, 3.0, 30.0),
        ("pack", "Packing", Department::Packaging, 2.0, 40.0),
    ];
    let mut template = RoutingTemplate::new("six-step", "Six step", PrintMethod::ScreenPrint)
        .with_product_type("Hoodie")
        .with_tier(RecommendationTier::Optimal);
    let mut previous: Option<&str> = None;
    for (id, name, dept, nominal, capacity) in specs {
        let mut step = RoutingStep::new(id, name, dept)
            .with_nominal_hours(nominal)
            .with_capacity(capacity);
        if let Some(prev) = previous {
            step = step.with_dependency(prev);
        }
        template = template.with_step(step);
        previous = Some(id);
    }
    template
}

fn cyclic_template() -> RoutingTemplate {
    RoutingTemplate::new("cyclic", "Cyclic", PrintMethod::Dtf)
        .with_product_type("Tote")
        .with_step(RoutingStep::new("a", "A", Department::Printing).with_dependency("b"))
        .with_step(RoutingStep::new("b", "B", Department::Sewing).with_dependency("a"))
}

// ==========================================
// Scenarios
// ==========================================

#[test]
fn scenario_a_sequential_estimate() {
    logging::init_test();
    let result = BasicEstimator::default()
        .estimate(&six_step_template(), 200, now() + Duration::days(20), now())
        .unwrap();

    assert!((result.total_estimated_hours - 118.4).abs() < 1e-6);
    assert_eq!(result.estimated_delivery_date, now() + Duration::days(15));
    assert!(result.feasible);
}

#[test]
fn scenario_b_cycle_rejected_and_catalog_unchanged() {
    logging::init_test();
    let catalog = TemplateCatalog::with_builtin_templates().unwrap();
    let before = catalog.len();

    let err = catalog.add(cyclic_template()).unwrap_err();
    assert!(err
        .validation_errors()
        .iter()
        .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    assert_eq!(catalog.len(), before);
    assert!(!catalog.contains("cyclic"));
}

#[test]
fn scenario_c_zero_quantity_rejected_everywhere() {
    logging::init_test();
    let catalog = Arc::new(TemplateCatalog::with_builtin_templates().unwrap());
    let advisor = Advisor::new(catalog, EngineConfig::default());
    let order = OrderContext::new("T-Shirt", PrintMethod::Dtg, 0, now() + Duration::days(7));

    assert!(matches!(
        advisor.recommend(&order, now()),
        Err(RoutingError::InvalidOrder(_))
    ));
    assert_eq!(
        BasicEstimator::default()
            .estimate(&six_step_template(), 0, now(), now())
            .unwrap_err(),
        RoutingError::InvalidQuantity
    );
    assert_eq!(
        DependencyScheduler::new()
            .schedule(&six_step_template(), 0, now())
            .unwrap_err(),
        RoutingError::InvalidQuantity
    );
}

#[test]
fn scenario_d_same_department_overlap_is_one_conflict() {
    logging::init_test();
    let template = RoutingTemplate::new("two-sides", "Front and back", PrintMethod::Dtg)
        .with_step(
            RoutingStep::new("front", "Front print", Department::Printing)
                .with_nominal_hours(2.0)
                .with_capacity(100.0)
                .parallel(),
        )
        .with_step(
            RoutingStep::new("back", "Back print", Department::Printing)
                .with_nominal_hours(3.0)
                .with_capacity(100.0)
                .parallel(),
        );

    let plan = RoutePlanner::default()
        .plan(&template, 50, now(), now() + Duration::days(5))
        .unwrap();

    assert_eq!(plan.resource_conflicts.len(), 1);
    assert_eq!(plan.resource_conflicts[0].department, Department::Printing);
    assert!(plan.conflict_messages()[0].starts_with("printing department overbooked"));
    assert_eq!(
        plan.optimization_suggestions,
        vec!["Add capacity to overbooked departments: printing".to_string()]
    );
}

#[test]
fn scenario_e_no_match_returns_warning() {
    logging::init_test();
    let catalog = Arc::new(TemplateCatalog::with_builtin_templates().unwrap());
    let advisor = Advisor::new(catalog, EngineConfig::default());
    let order = OrderContext::new("Umbrella", PrintMethod::HeatTransfer, 20, now());

    let rec = advisor.recommend(&order, now()).unwrap();
    assert!(rec.template.is_none());
    assert!(!rec.warnings.is_empty());
    assert!(rec.warnings[0]
        .to_lowercase()
        .contains("no suitable routing templates"));
}

// ==========================================
// Properties
// ==========================================

#[test]
fn add_then_list_round_trip() {
    let catalog = TemplateCatalog::empty();
    catalog.add(six_step_template()).unwrap();
    assert!(catalog.list().iter().any(|t| t.id == "six-step"));

    assert!(catalog.add(cyclic_template()).is_err());
    assert_eq!(catalog.len(), 1);
}

#[test]
fn estimate_is_byte_identical_across_calls() {
    let estimator = BasicEstimator::default();
    let template = six_step_template();
    let target = now() + Duration::days(9);
    let a = serde_json::to_string(&estimator.estimate(&template, 777, target, now()).unwrap()).unwrap();
    let b = serde_json::to_string(&estimator.estimate(&template, 777, target, now()).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn template_loaded_from_json_enters_catalog() {
    let json = r#"{
        "id": "patch",
        "name": "Woven patch",
        "method": "EMBROIDERY",
        "applicable_product_types": ["Cap"],
        "steps": [
            { "id": "digitize", "name": "Digitize", "nominal_hours": 2.0,
              "department": "DESIGN", "capacity_per_hour": 500.0 },
            { "id": "stitch", "name": "Stitch", "nominal_hours": 3.0,
              "department": "SEWING", "capacity_per_hour": 20.0,
              "dependencies": ["digitize"], "join_type": "AND" }
        ],
        "recommendation_tier": "OPTIMAL"
    }"#;
    let template: RoutingTemplate = serde_json::from_str(json).unwrap();
    let catalog = Arc::new(TemplateCatalog::empty());
    catalog.add(template).unwrap();

    let advisor = Advisor::new(Arc::clone(&catalog), EngineConfig::default());
    let order = OrderContext::new("cap", PrintMethod::Embroidery, 100, now() + Duration::days(10));
    let rec = advisor.recommend(&order, now()).unwrap();
    assert_eq!(rec.template_id(), Some("patch"));
}

// ==========================================
// Full production plan
// ==========================================

#[test]
fn full_plan_for_builtin_screen_print() {
    logging::init_test();
    let catalog = TemplateCatalog::with_builtin_templates().unwrap();
    let template = catalog.get("screen-print-standard").unwrap();

    let plan = RoutePlanner::default()
        .plan(&template, 240, now(), now() + Duration::days(7))
        .unwrap();

    // artwork 3 -> screens 2 -> print 4 -> cure 2 -> qc 1.6 -> pack 1.2
    assert!((plan.kpi.makespan_hours - 13.8).abs() < 1e-9);
    assert_eq!(
        plan.critical_path_steps,
        vec!["artwork", "screens", "print", "cure", "qc", "pack"]
    );
    assert_eq!(plan.parallel_schedule.len(), template.step_count());
    assert!(plan.resource_conflicts.is_empty());
    assert!(plan.optimization_suggestions.is_empty());
    assert_eq!(plan.summary.bottleneck_steps, vec!["Dryer cure", "Print inspection"]);
    assert_eq!(plan.summary.estimated_delivery_date, now() + Duration::days(3));
    assert!(plan.summary.feasible);

    // The sequential estimate never beats the parallel plan
    let quick = BasicEstimator::default()
        .estimate(&template, 240, now() + Duration::days(7), now())
        .unwrap();
    assert!(quick.total_estimated_hours >= plan.summary.total_estimated_hours);
}

#[test]
fn oversized_order_is_rejected_not_panicking() {
    logging::init_test();
    let template = RoutingTemplate::new("trickle", "Trickle", PrintMethod::Dtf).with_step(
        RoutingStep::new("press", "Press", Department::Finishing)
            .with_nominal_hours(1.0)
            .with_capacity(0.001),
    );
    assert!(u_routing::validation::validate_template(&template).is_ok());

    let target = now() + Duration::days(30);
    assert!(matches!(
        BasicEstimator::default().estimate(&template, u32::MAX, target, now()),
        Err(RoutingError::HorizonExceeded { .. })
    ));
    assert!(matches!(
        RoutePlanner::default().plan(&template, u32::MAX, now(), target),
        Err(RoutingError::HorizonExceeded { .. })
    ));
}
