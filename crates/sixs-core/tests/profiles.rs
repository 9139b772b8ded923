use sixs_core::params::{
    AeroProfile, AtmosProfile, AtmosType, ComponentMixture, MultimodalLogNormalDistribution,
    SunPhotometerDistribution,
};

const RADII: [f64; 22] = [
    0.050000001, 0.065604001, 0.086076997, 0.112939, 0.148184001, 0.194428995, 0.255104989,
    0.334715992, 0.439173013, 0.576227009, 0.756052017, 0.99199599, 1.30157101, 1.707757,
    2.24070191, 2.93996596, 3.85745192, 5.06126022, 6.64074516, 8.71314526, 11.4322901, 15.0,
];

const DENSITY: [f64; 22] = [
    0.001338098, 0.007492487, 0.026454749, 0.058904506, 0.082712278, 0.073251031, 0.040950641,
    0.014576218, 0.003672085, 0.001576356, 0.002422644, 0.004472982, 0.007452302, 0.011037065,
    0.014523974, 0.016981738, 0.017641816, 0.016284294, 0.01335547, 0.009732267, 0.006301342,
    0.003625077,
];

#[test]
fn latitude_and_date_resolve_to_predefined_profile() {
    let profile = AtmosProfile::from_latitude_and_date(53.0, "2015-07-14").expect("lookup");
    assert_eq!(
        profile,
        AtmosProfile::predefined(AtmosType::SubarcticSummer)
    );

    let tropical = AtmosProfile::from_latitude_and_date(4.0, "2015-01-02").expect("lookup");
    assert_eq!(tropical, AtmosProfile::predefined(AtmosType::Tropical));
}

#[test]
fn latitude_and_date_reject_bad_inputs() {
    let error = AtmosProfile::from_latitude_and_date(95.0, "2015-07-14").expect_err("latitude");
    assert_eq!(error.field(), "latitude");

    let error = AtmosProfile::from_latitude_and_date(10.0, "14/07/2015").expect_err("date");
    assert_eq!(error.field(), "date");
}

#[test]
fn mixture_above_unity_reports_excess() {
    let error = ComponentMixture::new(0.8, 0.0, 0.4, 0.0).expect_err("fractions sum to 1.2");
    assert!(error.constraint().contains("excess"), "{error}");

    assert!(AeroProfile::user_mixture(0.3, 0.0, 0.7, 0.0).is_ok());
}

#[test]
fn sun_photometer_requires_matching_lengths() {
    let error = SunPhotometerDistribution::new(
        RADII[..20].to_vec(),
        DENSITY.to_vec(),
        1.47,
        0.0093,
    )
    .expect_err("20 radii against 22 densities");
    assert!(error.to_string().contains("length"), "{error}");
}

#[test]
fn sun_photometer_requires_twenty_refractive_indices() {
    let error = SunPhotometerDistribution::new(
        RADII.to_vec(),
        DENSITY.to_vec(),
        vec![1.47; 15],
        vec![0.0093; 20],
    )
    .expect_err("15 real parts");
    assert!(error.to_string().contains("15"), "{error}");
}

#[test]
fn scalar_refractive_index_equals_explicit_series() {
    let broadcast =
        SunPhotometerDistribution::new(RADII.to_vec(), DENSITY.to_vec(), 1.47, 2.3)
            .expect("scalar input");
    let explicit = SunPhotometerDistribution::new(
        RADII.to_vec(),
        DENSITY.to_vec(),
        vec![1.47; 20],
        vec![2.3; 20],
    )
    .expect("series input");
    assert_eq!(broadcast, explicit);
}

#[test]
fn multimodal_rejects_fifth_component() {
    let mut distribution = MultimodalLogNormalDistribution::new(0.001, 20.0).expect("bounds");
    for _ in 0..4 {
        distribution
            .add_component(0.05, 2.03, 0.2, &[1.5; 20], &[3.24e-7; 20])
            .expect("component within limit");
    }
    let error = distribution
        .add_component(0.05, 2.03, 0.2, &[1.5; 20], &[3.24e-7; 20])
        .expect_err("fifth component");
    assert!(error.constraint().contains('4'), "{error}");
    assert_eq!(distribution.components().len(), 4);
}

#[test]
fn multimodal_component_needs_full_refractive_table() {
    let mut distribution = MultimodalLogNormalDistribution::new(0.001, 20.0).expect("bounds");
    assert!(
        distribution
            .add_component(0.05, 2.03, 0.538, &[1.5; 19], &[3.24e-7; 20])
            .is_err()
    );
    assert!(distribution.components().is_empty());
}

#[test]
fn repeated_create_and_add_keeps_profiles_independent() {
    let mut profiles = Vec::new();
    for round in 0..50 {
        let mut profile = MultimodalLogNormalDistribution::new(0.001, 20.0).expect("bounds");
        assert!(profile.components().is_empty(), "round {round} starts empty");
        profile
            .add_component(0.05, 2.03, 0.538, &[1.5; 20], &[3.24e-7; 20])
            .expect("component");
        assert_eq!(profile.components().len(), 1, "round {round}");
        profiles.push(profile);
    }

    assert!(profiles.iter().all(|profile| profile.components().len() == 1));
    let mut grown = profiles.swap_remove(0);
    for _ in 0..3 {
        grown
            .add_component(0.0695, 2.03, 0.457, &[1.44; 20], &[1.0e-8; 20])
            .expect("component");
    }
    assert_eq!(grown.components().len(), 4);
    assert!(profiles.iter().all(|profile| profile.components().len() == 1));
}
