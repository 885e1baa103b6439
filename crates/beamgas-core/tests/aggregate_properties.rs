use beamgas_core::domain::AnalysisErrorCategory;
use beamgas_core::registry::{ProcessRegistry, ProcessRegistryEntry};
use beamgas_core::{InteractionRecord, ProcessKey, aggregate};

const FRACTION_TOLERANCE: f64 = 1.0e-9;

fn registry() -> ProcessRegistry {
    ProcessRegistry::from_entries(
        [
            (12, 1, "ComptonScattering"),
            (12, 2, "PhotoElectricEffect"),
            (2, 3, "Bremsstrahlung"),
            (2, 2, "Ionisation"),
            (2, 5, "Annihilation"),
            (2, 1, "CoulombScattering"),
        ]
        .into_iter()
        .map(|(process_type, process_subtype, name)| ProcessRegistryEntry {
            process_type,
            process_subtype,
            name: name.to_string(),
        }),
    )
    .expect("registry should build")
}

/// Deterministic mixed sample of `size` records cycling through a few processes.
fn sample(size: usize) -> Vec<InteractionRecord> {
    let catalogue = [
        ("eBrem", 2, 3),
        ("eBrem", 2, 3),
        ("eBrem", 2, 3),
        ("eIoni", 2, 2),
        ("annihil", 2, 5),
        ("CoulombScat", 2, 1),
        ("eIoni", 2, 2),
    ];
    (0..size)
        .map(|index| {
            let (name, process_type, process_subtype) = catalogue[(index * 5 + index / 3) % catalogue.len()];
            InteractionRecord::new(name, process_type, process_subtype, -11)
        })
        .collect()
}

#[test]
fn counts_sum_to_number_of_records() {
    for size in [1_usize, 2, 7, 31, 250] {
        let records = sample(size);
        let result = aggregate(&records, &registry()).expect("aggregation should succeed");
        let counted: u64 = result.tallies().iter().map(|tally| tally.count).sum();
        assert_eq!(counted, size as u64, "size {}", size);
        assert_eq!(result.total(), size as u64);
    }
}

#[test]
fn fractions_sum_to_one() {
    for size in [1_usize, 3, 10, 99, 1000] {
        let result = aggregate(&sample(size), &registry()).expect("aggregation should succeed");
        let total: f64 = result.tallies().iter().map(|tally| tally.fraction).sum();
        assert!(
            (total - 1.0).abs() <= FRACTION_TOLERANCE,
            "size {} summed to {}",
            size,
            total
        );
        assert!(
            result
                .tallies()
                .iter()
                .all(|tally| (0.0..=1.0).contains(&tally.fraction))
        );
    }
}

#[test]
fn permuted_input_gives_identical_result() {
    let records = sample(40);
    let expected = aggregate(&records, &registry()).expect("aggregation should succeed");

    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(aggregate(&reversed, &registry()).unwrap(), expected);

    let mut rotated = records.clone();
    rotated.rotate_left(17);
    assert_eq!(aggregate(&rotated, &registry()).unwrap(), expected);

    let mut interleaved: Vec<_> = records.iter().step_by(2).cloned().collect();
    interleaved.extend(records.iter().skip(1).step_by(2).cloned());
    assert_eq!(aggregate(&interleaved, &registry()).unwrap(), expected);
}

#[test]
fn reporting_order_is_descending_fraction_then_name() {
    let result = aggregate(&sample(70), &registry()).expect("aggregation should succeed");
    for pair in result.tallies().windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        assert!(
            first.fraction > second.fraction
                || (first.fraction == second.fraction
                    && first.key.process_name <= second.key.process_name),
            "{} should precede {}",
            first.key,
            second.key
        );
    }
}

#[test]
fn compton_photoelectric_example() {
    let records = vec![
        InteractionRecord::new("compt", 12, 1, -11),
        InteractionRecord::new("compt", 12, 1, -11),
        InteractionRecord::new("phot", 12, 2, -11),
    ];
    let result = aggregate(&records, &registry()).expect("aggregation should succeed");

    assert_eq!(result.len(), 2);
    let compton = &result.tallies()[0];
    assert_eq!(compton.key, ProcessKey::new("compt", 12, 1));
    assert_eq!(compton.count, 2);
    assert!((compton.fraction - 0.667).abs() < 1.0e-3);

    let photo = &result.tallies()[1];
    assert_eq!(photo.key, ProcessKey::new("phot", 12, 2));
    assert_eq!(photo.count, 1);
    assert!((photo.fraction - 0.333).abs() < 1.0e-3);
}

#[test]
fn unregistered_codes_are_rejected() {
    let mut records = sample(5);
    records.push(InteractionRecord::new("msc", 2, 10, -11));
    let error = aggregate(&records, &registry()).expect_err("unregistered pair should fail");
    assert_eq!(error.category(), AnalysisErrorCategory::UnknownProcessError);
    assert_eq!(error.exit_code(), 5);
}
