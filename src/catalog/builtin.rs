//! Standard apparel routes.
//!
//! Baseline route set a fresh catalog can be seeded with. Nominal hours are
//! per-run set-up/handling minimums; capacities are shop-floor throughput
//! in garments per hour.

use crate::models::{
    ComplexityTier, Department, PrintMethod, RecommendationTier, RoutingStep, RoutingTemplate,
};

/// Returns the standard route set.
pub fn builtin_templates() -> Vec<RoutingTemplate> {
    vec![
        screen_print_standard(),
        dtg_on_demand(),
        sublimation_all_over(),
        embroidery_standard(),
        dtf_transfer(),
    ]
}

fn screen_print_standard() -> RoutingTemplate {
    RoutingTemplate::new("screen-print-standard", "Screen print - standard run", PrintMethod::ScreenPrint)
        .with_product_type("T-Shirt")
        .with_product_type("Hoodie")
        .with_product_type("Tank Top")
        .with_quantity_bounds(Some(24), None)
        .with_complexity(ComplexityTier::Medium)
        .with_tier(RecommendationTier::Optimal)
        .with_risk("Screen setup makes color changes mid-run expensive")
        .with_step(
            RoutingStep::new("artwork", "Color separation", Department::Design)
                .with_nominal_hours(3.0)
                .with_capacity(500.0)
                .with_skill("separations")
                .parallel(),
        )
        .with_step(
            RoutingStep::new("blank-prep", "Blank sorting and sizing", Department::Cutting)
                .with_nominal_hours(2.0)
                .with_capacity(120.0)
                .parallel(),
        )
        .with_step(
            RoutingStep::new("screens", "Screen burning", Department::Printing)
                .with_nominal_hours(2.0)
                .with_capacity(400.0)
                .with_dependency("artwork"),
        )
        .with_step(
            RoutingStep::new("print", "Press run", Department::Printing)
                .with_nominal_hours(4.0)
                .with_capacity(60.0)
                .with_skill("press-operator")
                .with_dependency("screens")
                .with_dependency("blank-prep"),
        )
        .with_step(
            RoutingStep::new("cure", "Dryer cure", Department::Finishing)
                .with_nominal_hours(1.0)
                .with_capacity(120.0)
                .with_dependency("print"),
        )
        .with_step(
            RoutingStep::new("qc", "Print inspection", Department::QualityControl)
                .with_nominal_hours(1.0)
                .with_capacity(150.0)
                .with_dependency("cure"),
        )
        .with_step(
            RoutingStep::new("pack", "Fold and pack", Department::Packaging)
                .with_nominal_hours(1.0)
                .with_capacity(200.0)
                .with_dependency("qc"),
        )
}

fn dtg_on_demand() -> RoutingTemplate {
    RoutingTemplate::new("dtg-on-demand", "Direct-to-garment - short run", PrintMethod::Dtg)
        .with_product_type("T-Shirt")
        .with_product_type("Hoodie")
        .with_quantity_bounds(None, Some(200))
        .with_complexity(ComplexityTier::Low)
        .with_tier(RecommendationTier::Optimal)
        .with_risk("Dark garments need pretreatment and a white underbase")
        .with_step(
            RoutingStep::new("artwork", "Print file prep", Department::Design)
                .with_nominal_hours(1.0)
                .with_capacity(1000.0)
                .parallel(),
        )
        .with_step(
            RoutingStep::new("pretreat", "Pretreatment", Department::Finishing)
                .with_nominal_hours(1.0)
                .with_capacity(40.0)
                .parallel(),
        )
        .with_step(
            RoutingStep::new("print", "DTG print", Department::Printing)
                .with_nominal_hours(2.0)
                .with_capacity(15.0)
                .with_dependency("artwork")
                .with_dependency("pretreat"),
        )
        .with_step(
            RoutingStep::new("press", "Heat press cure", Department::Finishing)
                .with_nominal_hours(0.5)
                .with_capacity(40.0)
                .with_dependency("print"),
        )
        .with_step(
            RoutingStep::new("qc", "Inspection", Department::QualityControl)
                .with_nominal_hours(0.5)
                .with_capacity(100.0)
                .with_dependency("press"),
        )
        .with_step(
            RoutingStep::new("pack", "Pack", Department::Packaging)
                .with_nominal_hours(0.5)
                .with_capacity(150.0)
                .with_dependency("qc"),
        )
}

fn sublimation_all_over() -> RoutingTemplate {
    RoutingTemplate::new("sublimation-all-over", "Sublimation - all-over cut and sew", PrintMethod::Sublimation)
        .with_product_type("T-Shirt")
        .with_product_type("Jersey")
        .with_product_type("Leggings")
        .with_quantity_bounds(Some(10), None)
        .with_complexity(ComplexityTier::High)
        .with_tier(RecommendationTier::Suitable)
        .with_risk("Requires polyester-rich fabric; cotton does not hold sublimation dye")
        .with_risk("Panel shrinkage during pressing can throw off sizing")
        .with_step(
            RoutingStep::new("pattern", "Pattern nesting", Department::Design)
                .with_nominal_hours(4.0)
                .with_capacity(300.0),
        )
        .with_step(
            RoutingStep::new("transfer", "Transfer paper print", Department::Printing)
                .with_nominal_hours(3.0)
                .with_capacity(30.0)
                .with_dependency("pattern"),
        )
        .with_step(
            RoutingStep::new("press", "Roll press onto fabric", Department::Printing)
                .with_nominal_hours(3.0)
                .with_capacity(25.0)
                .with_dependency("transfer"),
        )
        .with_step(
            RoutingStep::new("cut", "Panel cutting", Department::Cutting)
                .with_nominal_hours(2.0)
                .with_capacity(40.0)
                .with_dependency("press"),
        )
        .with_step(
            RoutingStep::new("sew", "Assembly", Department::Sewing)
                .with_nominal_hours(6.0)
                .with_capacity(8.0)
                .with_skill("overlock")
                .with_dependency("cut"),
        )
        .with_step(
            RoutingStep::new("qc", "Seam and color check", Department::QualityControl)
                .with_nominal_hours(1.0)
                .with_capacity(60.0)
                .with_dependency("sew"),
        )
        .with_step(
            RoutingStep::new("pack", "Pack", Department::Packaging)
                .with_nominal_hours(1.0)
                .with_capacity(120.0)
                .with_dependency("qc"),
        )
}

fn embroidery_standard() -> RoutingTemplate {
    RoutingTemplate::new("embroidery-standard", "Embroidery - standard", PrintMethod::Embroidery)
        .with_product_type("Polo")
        .with_product_type("Cap")
        .with_product_type("Hoodie")
        .with_product_type("T-Shirt")
        .with_complexity(ComplexityTier::Medium)
        .with_tier(RecommendationTier::Suitable)
        .with_risk("Stitch count drives run time; dense logos can double machine hours")
        .with_step(
            RoutingStep::new("digitize", "Digitizing", Department::Design)
                .with_nominal_hours(3.0)
                .with_capacity(1000.0)
                .with_skill("digitizing")
                .parallel(),
        )
        .with_step(
            RoutingStep::new("hooping", "Hooping and backing", Department::Finishing)
                .with_nominal_hours(1.0)
                .with_capacity(60.0)
                .parallel(),
        )
        .with_step(
            RoutingStep::new("stitch", "Machine embroidery", Department::Sewing)
                .with_nominal_hours(6.0)
                .with_capacity(10.0)
                .with_dependency("digitize")
                .with_dependency("hooping"),
        )
        .with_step(
            RoutingStep::new("trim", "Trim and steam", Department::Finishing)
                .with_nominal_hours(1.0)
                .with_capacity(50.0)
                .with_dependency("stitch"),
        )
        .with_step(
            RoutingStep::new("qc", "Inspection", Department::QualityControl)
                .with_nominal_hours(1.0)
                .with_capacity(100.0)
                .with_dependency("trim"),
        )
        .with_step(
            RoutingStep::new("pack", "Pack", Department::Packaging)
                .with_nominal_hours(0.5)
                .with_capacity(150.0)
                .with_dependency("qc"),
        )
}

fn dtf_transfer() -> RoutingTemplate {
    RoutingTemplate::new("dtf-transfer", "DTF transfer", PrintMethod::Dtf)
        .with_product_type("T-Shirt")
        .with_product_type("Hoodie")
        .with_product_type("Tote Bag")
        .with_complexity(ComplexityTier::Low)
        .with_tier(RecommendationTier::Suitable)
        .with_risk("Transfer adhesion drops on heavily textured fabrics")
        .with_step(
            RoutingStep::new("artwork", "Gang sheet layout", Department::Design)
                .with_nominal_hours(1.0)
                .with_capacity(800.0),
        )
        .with_step(
            RoutingStep::new("film", "Film print", Department::Printing)
                .with_nominal_hours(1.5)
                .with_capacity(50.0)
                .with_dependency("artwork"),
        )
        .with_step(
            RoutingStep::new("powder", "Powder and cure", Department::Finishing)
                .with_nominal_hours(1.0)
                .with_capacity(60.0)
                .with_dependency("film"),
        )
        .with_step(
            RoutingStep::new("press", "Heat press application", Department::Finishing)
                .with_nominal_hours(1.5)
                .with_capacity(35.0)
                .with_dependency("powder"),
        )
        .with_step(
            RoutingStep::new("qc", "Peel test and inspection", Department::QualityControl)
                .with_nominal_hours(0.5)
                .with_capacity(100.0)
                .with_dependency("press"),
        )
        .with_step(
            RoutingStep::new("pack", "Pack", Department::Packaging)
                .with_nominal_hours(0.5)
                .with_capacity(150.0)
                .with_dependency("qc"),
        )
}
