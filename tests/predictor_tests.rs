use crop_yield_backend::message::PredictionRequest;
use crop_yield_backend::services::predictor::{
    FactorTable, FieldInputs, FixedRandom, ThreadRandom, YieldModel, clamp_yield,
    format_hundredths, validate,
};
use rust_decimal::Decimal;
use serde_json::json;

fn request(body: serde_json::Value) -> PredictionRequest {
    serde_json::from_value(body).unwrap()
}

fn wheat_on_loam() -> FieldInputs {
    FieldInputs {
        crop: "wheat".into(),
        area: 10.0,
        soil: "loam".into(),
        rain: 500.0,
        fertilizer: 20.0,
    }
}

#[test]
fn test_validation_accepts_numeric_strings() {
    let inputs = validate(&request(json!({
        "crop": "Corn", "area": "2.5", "soil": "clay", "rain": 300, "fertilizer": "0"
    })))
    .unwrap();
    assert_eq!(inputs.area, 2.5);
    assert_eq!(inputs.rain, 300.0);
    assert_eq!(inputs.fertilizer, 0.0);
}

#[test]
fn test_validation_rejects_bad_inputs() {
    let base = json!({
        "crop": "wheat", "area": 10, "soil": "loam", "rain": 500, "fertilizer": 20
    });
    let cases = [
        ("area", json!(0)),
        ("area", json!(-1)),
        ("area", json!("abc")),
        ("rain", json!(-0.01)),
        ("fertilizer", json!(-1)),
        ("crop", json!("")),
        ("soil", json!("")),
        ("crop", json!(42)),
        ("area", json!(null)),
        ("rain", json!({})),
        ("fertilizer", json!([1, 2])),
    ];

    for (field, value) in cases {
        let mut body = base.clone();
        body[field] = value.clone();
        assert!(
            validate(&request(body)).is_none(),
            "{field} = {value} should be rejected"
        );
    }

    assert!(validate(&request(base)).is_some());
}

#[test]
fn test_validation_coerces_loose_values() {
    let inputs = validate(&request(json!({
        "crop": "wheat", "area": "0x10", "soil": "loam", "rain": null, "fertilizer": true
    })))
    .unwrap();
    assert_eq!(inputs.area, 16.0);
    assert_eq!(inputs.rain, 0.0);
    assert_eq!(inputs.fertilizer, 1.0);

    let inputs = validate(&request(json!({
        "crop": "wheat", "area": ["4"], "soil": "loam", "rain": [], "fertilizer": ""
    })))
    .unwrap();
    assert_eq!(inputs.area, 4.0);
    assert_eq!(inputs.rain, 0.0);
    assert_eq!(inputs.fertilizer, 0.0);
}

#[test]
fn test_validation_rejects_missing_fields() {
    assert!(validate(&request(json!({ "crop": "wheat", "area": 10, "soil": "loam" }))).is_none());
    // absent differs from an explicit null
    assert!(
        validate(&request(json!({
            "crop": "wheat", "area": 10, "soil": "loam", "fertilizer": 0
        })))
        .is_none()
    );
}

#[test]
fn test_exact_estimate_with_fixed_draws() {
    let model = YieldModel::default();
    // jitter = 0.2 * 0.5, regional noise = 0.5 * 0.1
    let estimate = model
        .estimate(&wheat_on_loam(), &FixedRandom::new([0.2, 0.5]))
        .unwrap();

    assert_eq!(format_hundredths(estimate.estimated_yield), "14.20");
    assert_eq!(format_hundredths(estimate.avg_region), "12.12");
}

#[test]
fn test_estimate_range_with_real_randomness() {
    let model = YieldModel::default();
    for _ in 0..200 {
        let estimate = model.estimate(&wheat_on_loam(), &ThreadRandom).unwrap();
        assert!(
            (Decimal::new(1410, 2)..=Decimal::new(1460, 2)).contains(&estimate.estimated_yield),
            "yield {} out of range",
            estimate.estimated_yield
        );
        let noise = estimate.avg_region - estimate.estimated_yield * Decimal::new(85, 2);
        assert!(
            (Decimal::new(-6, 3)..=Decimal::new(106, 3)).contains(&noise),
            "regional noise {noise}"
        );
    }
}

#[test]
fn test_unknown_names_use_neutral_factor() {
    let model = YieldModel::default();
    assert_eq!(model.crops.factor_for("Barley"), 1.0);
    assert_eq!(model.soils.factor_for("Gravel"), 1.0);

    let inputs = FieldInputs {
        crop: "Barley".into(),
        area: 10.0,
        soil: "Gravel".into(),
        rain: 0.0,
        fertilizer: 0.0,
    };
    let estimate = model.estimate(&inputs, &FixedRandom::constant(0.0)).unwrap();
    assert_eq!(estimate.estimated_yield, Decimal::TEN);
}

#[test]
fn test_lookup_is_case_insensitive() {
    let model = YieldModel::default();
    assert_eq!(model.crops.factor_for("CORN"), 1.3);
    assert_eq!(model.crops.factor_for("rice"), 1.2);
    assert_eq!(model.soils.factor_for("sAnDy"), 0.8);
}

#[test]
fn test_yield_never_negative() {
    assert_eq!(clamp_yield(-3.5), 0.0);

    let model = YieldModel {
        crops: FactorTable::new([("Blight", -5.0)]),
        soils: FactorTable::soils(),
    };
    let inputs = FieldInputs {
        crop: "blight".into(),
        area: 1.0,
        soil: "silt".into(),
        rain: 0.0,
        fertilizer: 0.0,
    };
    let estimate = model.estimate(&inputs, &FixedRandom::constant(0.0)).unwrap();
    assert_eq!(estimate.estimated_yield, Decimal::ZERO);
    assert_eq!(estimate.avg_region, Decimal::ZERO);
}

#[test]
fn test_half_cent_rounds_like_fixed_notation() {
    // 0.015 sits just below the half once stored, so it rounds down
    let model = YieldModel {
        crops: FactorTable::new([("Sprout", 0.015)]),
        soils: FactorTable::soils(),
    };
    let inputs = FieldInputs {
        crop: "sprout".into(),
        area: 1.0,
        soil: "silt".into(),
        rain: 0.0,
        fertilizer: 0.0,
    };
    let estimate = model.estimate(&inputs, &FixedRandom::constant(0.0)).unwrap();
    assert_eq!(format_hundredths(estimate.estimated_yield), "0.01");
}

#[test]
fn test_unrepresentable_estimate_is_none() {
    let inputs = FieldInputs {
        area: 1e300,
        ..wheat_on_loam()
    };
    assert!(YieldModel::default().estimate(&inputs, &ThreadRandom).is_none());
}
