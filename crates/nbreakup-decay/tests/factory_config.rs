use nbreakup_core::{DecayError, Particle, RngHandle, NEUTRON_MASS};
use nbreakup_decay::{DecayConfig, DecayFactory, DecayKind, Verbosity};

#[test]
fn factory_builds_every_model() {
    for kind in DecayKind::ALL {
        let mut factory = DecayFactory::new();
        factory.set_decay_type(kind.as_str());
        assert_eq!(factory.decay_type(), kind.as_str());
        let decay = factory.create().unwrap();
        assert_eq!(decay.kind(), kind);
        assert_eq!(decay.number_of_neutrons(), kind.number_of_neutrons());
        assert_eq!(decay.verbose_level(), Verbosity::Fatal);
    }
}

#[test]
fn factory_options_reach_the_generator() {
    let mut factory = DecayFactory::new();
    factory.set_decay_type("1n");
    factory.set_decay_option("energy", 0.45);
    factory.set_decay_option("width", 0.0);
    factory.set_verbose_level(Verbosity::Silent);
    assert_eq!(factory.decay_option("energy"), Some(0.45));
    assert_eq!(factory.decay_option("centroid"), None);

    let mut decay = factory.create().unwrap();
    assert_eq!(decay.decay_param("energy").unwrap(), 0.45);
    assert_eq!(decay.verbose_level(), Verbosity::Silent);

    decay.set_input_particle(&Particle::at_rest(16_000.0 + NEUTRON_MASS, 1.0));
    let mut rng = RngHandle::from_seed(1);
    let state = decay.generate(&mut rng).unwrap().unwrap();
    assert_eq!(state.decay_energy, 0.45);
}

#[test]
fn created_generators_are_independent() {
    let mut factory = DecayFactory::new();
    factory.set_decay_type("2n-sequential");
    let mut first = factory.create().unwrap();
    let second = factory.create().unwrap();
    first.set_decay_param("intermediate-energy", 0.9).unwrap();
    assert_eq!(first.decay_param("intermediate-energy").unwrap(), 0.9);
    assert_eq!(second.decay_param("intermediate-energy").unwrap(), 0.0);
}

#[test]
fn unknown_type_is_a_config_error() {
    let mut factory = DecayFactory::new();
    factory.set_decay_type("3n-phase-space");
    let err = factory.create().err().unwrap();
    assert!(matches!(err, DecayError::Config(_)));
    assert_eq!(err.code(), "unknown-decay-type");
}

#[test]
fn option_outside_whitelist_is_a_config_error() {
    let mut factory = DecayFactory::new();
    factory.set_decay_type("2n-dineutron");
    factory.set_decay_option("source-size", 4.0);
    let err = factory.create().err().unwrap();
    assert_eq!(err.code(), "unknown-parameter");
}

#[test]
fn yaml_configuration_drives_the_factory() {
    let yaml = r#"
type: 2n-phase-space-fsi
options:
  source-size: 4.5
  max-tries: 5000
verbosity: all
"#;
    let factory = DecayFactory::from_yaml_str(yaml).unwrap();
    assert_eq!(factory.decay_type(), "2n-phase-space-fsi");
    let decay = factory.create().unwrap();
    assert_eq!(decay.kind(), DecayKind::PhaseSpaceFsi);
    assert_eq!(decay.decay_param("source-size").unwrap(), 4.5);
    assert_eq!(decay.decay_param("max-tries").unwrap(), 5000.0);
    assert_eq!(decay.decay_param("effective-range").unwrap(), 2.75);
    assert_eq!(decay.verbose_level(), Verbosity::All);
}

#[test]
fn config_documents_round_trip() {
    let config = DecayConfig::new(DecayKind::Sequential)
        .with_option("intermediate-energy", 0.8)
        .with_option("intermediate-width", 0.05);
    let yaml = config.to_yaml_string().unwrap();
    assert!(yaml.contains("2n-sequential"));
    assert_eq!(DecayConfig::from_yaml_str(&yaml).unwrap(), config);

    let json = r#"{"type": "1n", "options": {"energy": 0.3}}"#;
    let parsed = DecayConfig::from_json_str(json).unwrap();
    assert_eq!(parsed.kind, DecayKind::OneNeutron);
    assert_eq!(parsed.options["energy"], 0.3);
    assert_eq!(parsed.verbosity, Verbosity::Fatal);
}

#[test]
fn malformed_documents_are_serde_errors() {
    let err = DecayConfig::from_yaml_str("type: 5n\n").unwrap_err();
    assert!(matches!(err, DecayError::Serde(_)));
    assert_eq!(err.code(), "invalid-config-document");
    assert!(DecayConfig::from_json_str("{\"options\": {}}").is_err());
}

#[test]
fn kind_identifiers_parse_back() {
    for kind in DecayKind::ALL {
        assert_eq!(kind.as_str().parse::<DecayKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.as_str());
    }
}
