use sixs_core::domain::OutputError;
use sixs_core::report::{
    ComponentProperty, OutputField, TransmittanceKind, parse_report, parse_report_requiring,
};
use std::fs;
use std::path::PathBuf;

const TOLERANCE: f64 = 0.002;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("fixture {} should be readable: {}", path.display(), error))
}

fn assert_close(actual: Option<f64>, expected: f64, what: &str) {
    let actual = actual.unwrap_or_else(|| panic!("{what} should be present"));
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn user_mixture_report_yields_radiance_breakdown() {
    let outputs = parse_report(&fixture("user_mixture_avhrr_report.txt"));

    assert_close(outputs.apparent_radiance(), 12.749, "apparent radiance");
    assert_close(
        outputs.get(OutputField::AtmosphericIntrinsicRadiance),
        4.274,
        "intrinsic radiance",
    );
    assert_close(outputs.background_radiance(), 0.629, "environment radiance");
    assert_close(outputs.pixel_radiance(), 7.846, "target radiance");
    assert_close(outputs.get(OutputField::ScatteringAngle), 114.6, "scattering angle");
    assert_close(outputs.get(OutputField::WvUnderAerosol), 0.124, "wv under aerosol");
    assert_close(outputs.get(OutputField::SolarSpectrum), 1540.494, "solar spectrum");
    assert_eq!(outputs.version(), Some("1.1"));
}

#[test]
fn user_mixture_report_carries_correction_results() {
    let outputs = parse_report(&fixture("user_mixture_avhrr_report.txt"));

    assert_close(
        outputs.get(OutputField::InputApparentReflectance),
        0.1,
        "input reflectance",
    );
    assert_close(outputs.get(OutputField::MeasuredRadiance), 10.386, "measured radiance");
    assert_close(
        outputs.get(OutputField::AtmosCorrectedReflectanceBrdf),
        0.05946,
        "brdf corrected reflectance",
    );
    assert_close(outputs.get(OutputField::CoefXa), 0.00788, "xa");
    assert_close(outputs.get(OutputField::CoefXb), 0.03332, "xb");
    assert_close(outputs.get(OutputField::CoefXc), 0.17096, "xc");
    assert_close(
        outputs.apparent_reflectance(),
        0.1227542,
        "integrated apparent reflectance wins over the corrected input",
    );
}

#[test]
fn transmittance_and_property_tables_are_complete() {
    let outputs = parse_report(&fixture("user_mixture_avhrr_report.txt"));

    for kind in TransmittanceKind::ALL {
        assert!(
            outputs.transmittance(kind).is_some(),
            "{} row should be parsed",
            kind.as_str()
        );
    }
    for property in ComponentProperty::ALL {
        assert!(
            outputs.property(property).is_some(),
            "{} row should be parsed",
            property.as_str()
        );
    }

    let ozone = outputs
        .transmittance(TransmittanceKind::Ozone)
        .expect("ozone row");
    assert_eq!(ozone.downward, 0.97188);
    assert_eq!(ozone.upward, 0.97268);
    assert_eq!(ozone.total, 0.9453);

    let reflectance_u = outputs
        .property(ComponentProperty::ReflectanceU)
        .expect("reflectance U row");
    assert_eq!(reflectance_u.rayleigh, -0.00903);
}

#[test]
fn sun_photometer_report_matches_reference_values() {
    let outputs = parse_report_requiring(
        &fixture("sun_photometer_report.txt"),
        &[OutputField::ApparentRadiance, OutputField::BackgroundRadiance],
    )
    .expect("required radiances present");

    assert_close(outputs.apparent_radiance(), 76.999, "apparent radiance");
    assert_close(outputs.background_radiance(), 10.017, "background radiance");
    assert_close(
        outputs.get(OutputField::AtmosphericIntrinsicRadiance),
        60.412,
        "intrinsic radiance",
    );
    assert_close(outputs.pixel_radiance(), 6.57, "target radiance");
}

#[test]
fn conditional_sections_stay_absent() {
    let outputs = parse_report(&fixture("sun_photometer_report.txt"));
    assert_eq!(outputs.get(OutputField::MeasuredRadiance), None);
    assert_eq!(outputs.get(OutputField::WvAboveAerosol), None);

    let error = parse_report_requiring(
        &fixture("sun_photometer_report.txt"),
        &[OutputField::CoefXa],
    )
    .expect_err("no correction section");
    assert_eq!(error, OutputError::Missing { field: "coef_xa" });
}

#[test]
fn outputs_serialize_with_field_names() {
    let outputs = parse_report(&fixture("sun_photometer_report.txt"));
    let json = serde_json::to_value(&outputs).expect("outputs encode");
    assert_eq!(json["values"]["apparent_radiance"], 76.999);
    assert_eq!(json["version"], "1.1");
    assert_eq!(json["transmittances"]["water"]["total"], 1.0);
}
