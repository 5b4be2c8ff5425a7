//! Region table and query scenarios for small hand-built wavefans.
//!
//! Covers discontinuity-only fans, a single rarefaction in both head/tail
//! orders, a mixed shock + rarefaction fan, and construction failures.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wavefan::{
    ConfigurationError, EvaluationError, Evaluator, PrimitiveState, RegionKind, Wave, WaveRecord,
    Wavefan, WavefanConfig, WavefanError,
};

const INF: f64 = f64::INFINITY;

fn gas(density: f64, velocity: f64, pressure: f64) -> PrimitiveState {
    PrimitiveState::new(density, velocity, pressure)
}

/// Linear ramp used as a fan interior: density grows with ξ.
fn ramp(xi: f64) -> PrimitiveState {
    gas(1.0 + xi, 0.5 * xi, 2.0)
}

fn constant_of(evaluator: &Evaluator<PrimitiveState>) -> Option<PrimitiveState> {
    evaluator.as_constant().copied()
}

// =============================================================================
// Two shocks
// =============================================================================

#[test]
fn test_two_shocks_table() {
    let (l, m, r) = (gas(1.0, 0.0, 1.0), gas(2.0, 0.1, 3.0), gas(0.5, 0.0, 0.2));
    let fan = Wavefan::new(vec![l, m, r], vec![Wave::shock(-2.0), Wave::shock(3.0)]).unwrap();

    assert_eq!(fan.boundaries(), &[-INF, -2.0, 3.0, INF]);
    let constants: Vec<_> = fan.table().evaluators().iter().map(constant_of).collect();
    assert_eq!(constants, vec![Some(l), Some(m), Some(r)]);
}

#[test]
fn test_two_shocks_queries() {
    let (l, m, r) = (gas(1.0, 0.0, 1.0), gas(2.0, 0.1, 3.0), gas(0.5, 0.0, 0.2));
    let fan = Wavefan::new(vec![l, m, r], vec![Wave::shock(-2.0), Wave::shock(3.0)]).unwrap();

    assert_eq!(fan.state(-5.0).unwrap(), l);
    assert_eq!(fan.state(0.0).unwrap(), m);
    assert_eq!(fan.state(10.0).unwrap(), r);
    // On a shock the state to its right wins
    assert_eq!(fan.state(3.0).unwrap(), r);
    assert_eq!(fan.state(-2.0).unwrap(), m);
    assert_eq!(fan.state(f64::NEG_INFINITY).unwrap(), l);
    assert_eq!(fan.state(f64::INFINITY).unwrap(), r);
}

// =============================================================================
// Single rarefaction
// =============================================================================

#[test]
fn test_single_rarefaction() {
    let (l, r) = (ramp(-1.0), ramp(2.0));
    let fan = Wavefan::new(vec![l, r], vec![Wave::rarefaction(-1.0, 2.0, ramp)]).unwrap();

    assert_eq!(fan.boundaries(), &[-INF, -1.0, 2.0, INF]);
    let kinds: Vec<_> = fan.table().evaluators().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![RegionKind::Constant, RegionKind::Fan, RegionKind::Constant]
    );

    assert_eq!(fan.state(0.5).unwrap(), ramp(0.5));
    // The head edge belongs to the fan interior
    assert_eq!(fan.state(-1.0).unwrap(), ramp(-1.0));
    assert_eq!(fan.state(2.0).unwrap(), r);
    assert_eq!(fan.state(-1.5).unwrap(), l);
}

#[test]
fn test_reversed_rarefaction_same_table() {
    let (l, r) = (ramp(-1.0), ramp(2.0));
    let forward = Wavefan::new(vec![l, r], vec![Wave::rarefaction(-1.0, 2.0, ramp)]).unwrap();
    let reversed = Wavefan::new(vec![l, r], vec![Wave::rarefaction(2.0, -1.0, ramp)]).unwrap();

    assert_eq!(forward.boundaries(), reversed.boundaries());
    for xi in [-3.0, -1.0, 0.0, 0.5, 1.999, 2.0, 4.0] {
        assert_eq!(forward.state(xi).unwrap(), reversed.state(xi).unwrap());
    }
}

#[test]
fn test_fan_evaluator_is_the_supplied_function() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let wave = Wave::rarefaction(-1.0, 2.0, move |xi| {
        counter.fetch_add(1, Ordering::SeqCst);
        ramp(xi)
    });

    let fan = Wavefan::new(vec![ramp(-1.0), ramp(2.0)], vec![wave]).unwrap();
    let Wave::Rarefaction(rarefaction) = &fan.waves()[0] else {
        unreachable!()
    };
    assert!(fan.table().evaluators()[1].is_fan_of(rarefaction.interior()));

    fan.state(-5.0).unwrap();
    fan.state(5.0).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    fan.state(0.0).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Mixed: shock then rarefaction
// =============================================================================

#[test]
fn test_shock_then_rarefaction() {
    let states = vec![gas(1.0, 0.0, 1.0), ramp(2.0), ramp(5.0)];
    let waves = vec![Wave::shock(1.0), Wave::rarefaction(2.0, 5.0, ramp)];
    let fan = Wavefan::new(states.clone(), waves).unwrap();

    assert_eq!(fan.boundaries().len(), 2 + 1 + 2);
    assert_eq!(fan.table().evaluators().len(), 4);
    assert_eq!(fan.table().evaluators().len(), fan.boundaries().len() - 1);
    assert_eq!(fan.boundaries(), &[-INF, 1.0, 2.0, 5.0, INF]);

    assert_eq!(fan.state(0.0).unwrap(), states[0]);
    assert_eq!(fan.state(1.0).unwrap(), states[1]);
    assert_eq!(fan.state(1.5).unwrap(), states[1]);
    assert_eq!(fan.state(3.5).unwrap(), ramp(3.5));
    assert_eq!(fan.state(5.0).unwrap(), states[2]);
}

#[test]
fn test_contact_between_fans() {
    // Rarefaction, contact, rarefaction: the full two-fan structure
    let waves = vec![
        Wave::rarefaction(-3.0, -2.0, ramp),
        Wave::contact(0.0),
        Wave::rarefaction(2.0, 3.0, ramp),
    ];
    let states = vec![ramp(-3.0), ramp(-2.0), ramp(2.0), ramp(3.0)];
    let fan = Wavefan::new(states, waves).unwrap();

    assert_eq!(fan.boundaries(), &[-INF, -3.0, -2.0, 0.0, 2.0, 3.0, INF]);
    assert_eq!(fan.n_regions(), 6);
    assert_eq!(fan.state(-0.5).unwrap(), ramp(-2.0));
    assert_eq!(fan.state(0.0).unwrap(), ramp(2.0));
    assert_eq!(fan.state(2.5).unwrap(), ramp(2.5));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_arity_mismatch() {
    let too_many_states = Wavefan::new(vec![1.0, 2.0, 3.0], vec![Wave::shock(0.0)]);
    assert_eq!(
        too_many_states.unwrap_err(),
        ConfigurationError::ArityMismatch {
            states: 3,
            waves: 1
        }
    );

    let too_many_waves = Wavefan::new(vec![1.0], vec![Wave::shock(0.0)]);
    assert!(matches!(
        too_many_waves,
        Err(ConfigurationError::ArityMismatch { .. })
    ));

    // Unchecked mode keeps the arity check
    let unchecked = Wavefan::<f64>::unchecked(vec![], vec![]);
    assert!(matches!(
        unchecked,
        Err(ConfigurationError::ArityMismatch { states: 0, waves: 0 })
    ));
}

#[test]
fn test_unrecognized_wave_record() {
    fn assemble(records: &[WaveRecord]) -> Result<Wavefan<f64>, WavefanError> {
        let waves = records
            .iter()
            .map(|r| Wave::from_record(r, None))
            .collect::<Result<Vec<_>, _>>()?;
        let states = (0..=waves.len()).map(|i| i as f64).collect();
        Ok(Wavefan::new(states, waves)?)
    }

    let ok = assemble(&[
        WaveRecord::discontinuity("shock", -1.0),
        WaveRecord::discontinuity("contact", 0.5),
    ])
    .unwrap();
    assert_eq!(ok.state(0.0).unwrap(), 1.0);

    let err = assemble(&[WaveRecord::discontinuity("detonation", 0.0)]).unwrap_err();
    let WavefanError::Configuration(ConfigurationError::UnrecognizedWave { kind }) = err else {
        panic!("expected an unrecognized wave kind");
    };
    assert_eq!(kind, "detonation");
}

#[test]
fn test_wave_records_from_json() {
    let json = r#"[
        { "kind": "rarefaction", "speed_head": -2.0, "speed_tail": -1.0 },
        { "kind": "contact_discontinuity", "speed": 0.25 },
        { "kind": "shock", "speed": 1.5 }
    ]"#;
    let records: Vec<WaveRecord> = serde_json::from_str(json).unwrap();

    let interior: wavefan::InteriorFn<f64> =
        Arc::new(|xi: f64| -> Result<f64, EvaluationError> { Ok(-xi) });
    let waves = records
        .iter()
        .map(|r| Wave::from_record(r, Some(Arc::clone(&interior))))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let fan = Wavefan::new(vec![2.0, 1.0, 0.5, 0.0], waves).unwrap();
    assert_eq!(fan.boundaries(), &[-INF, -2.0, -1.0, 0.25, 1.5, INF]);
    assert_eq!(fan.state(-1.5).unwrap(), 1.5);

    let round_trip: Vec<WaveRecord> = fan.waves().iter().map(WaveRecord::from).collect();
    assert_eq!(round_trip, records);
}

#[test]
fn test_interior_failure_propagates() {
    #[derive(Debug)]
    struct NegativeSoundSpeed;

    impl std::fmt::Display for NegativeSoundSpeed {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("negative sound speed")
        }
    }

    impl std::error::Error for NegativeSoundSpeed {}

    let fan = Wavefan::new(
        vec![0.0, 1.0],
        vec![Wave::try_rarefaction(0.0, 1.0, |xi| {
            if xi < 0.5 {
                Ok(xi)
            } else {
                Err(EvaluationError::interior(xi, NegativeSoundSpeed))
            }
        })],
    )
    .unwrap();

    assert_eq!(fan.state(0.25).unwrap(), 0.25);

    let err = fan.state(0.75).unwrap_err();
    let EvaluationError::Interior { xi, source } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(*xi, 0.75);
    assert!(source.downcast_ref::<NegativeSoundSpeed>().is_some());

    // Batches surface the same failure instead of substituting a state
    assert!(matches!(
        fan.state_batch(&[0.0, 0.75, 2.0]),
        Err(EvaluationError::Interior { .. })
    ));
}

#[test]
fn test_tolerance_config() {
    let waves = || vec![Wave::shock(1.0), Wave::contact(1.0 - 1e-13)];

    assert!(Wavefan::new(vec![0.0, 1.0, 2.0], waves()).is_err());

    let config = WavefanConfig::default().with_tolerance(1e-10);
    let fan = Wavefan::with_config(vec![0.0, 1.0, 2.0], waves(), config).unwrap();
    assert_eq!(fan.state(1.0).unwrap(), 2.0);
}

#[test]
fn test_display_is_stable() {
    let build = || {
        Wavefan::new(
            vec![gas(1.0, 0.0, 1.0), gas(0.125, 0.0, 0.1)],
            vec![Wave::rarefaction(-1.0, 2.0, ramp)],
        )
        .unwrap()
    };

    let rendered = build().to_string();
    assert_eq!(rendered, build().to_string());

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("state 0: PrimitiveState"));
    assert_eq!(lines[1], "wave 0: rarefaction from xi = -1 (head) to xi = 2 (tail)");
    assert!(lines[2].starts_with("state 1: PrimitiveState"));
}
