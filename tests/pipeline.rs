//! End-to-end FAC scoring from a peak table file to a score table file.

use std::fs;

use approx::assert_relative_eq;
use facscore::{io, FacConfig, FacError, FacScore, Normalization, RATIO_SENTINEL};

const TWO_GROUPS: &str = "\
group,101.07,202.11
A,10,5
A,12,5
B,0,5
B,0,5
";

const WITH_CONTROL: &str = "\
sample\tgroup\t101.07\t202.11\t303.15\t404.19
s1\tA\t10\t5\t2\t
s2\tA\t12\t5\t2.5\t0.4
s3\tB\t0\t5\t40\t0.6
s4\tB\t\t5\t30\t0.5
s5\tdST\t0\t6\t1\tNA
s6\tdST\t0\t4\t1.5\t0.2
";

#[test]
fn test_exclusive_ion_scores_high() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("peaks.csv");
    fs::write(&input, TWO_GROUPS).unwrap();

    let table = io::read_peak_table(&input, "group", None).unwrap();
    let config = FacConfig::builder()
        .normalization(Normalization::fixed_offset())
        .build();
    let results = FacScore::new(&table, config).run().unwrap();

    // ion 101.07 is only detected in group A
    assert_eq!(results.ratios.value("A", "101.07"), Some(RATIO_SENTINEL));
    let exclusive = results.raw_scores.scores().value("A", "101.07").unwrap();
    assert_relative_eq!(exclusive, RATIO_SENTINEL.log10(), epsilon = 1e-12);

    // ion 202.11 has equal means everywhere: log ratio 0, score 0
    assert_relative_eq!(results.ratios.value("A", "202.11").unwrap(), 1.0);
    assert_eq!(results.raw_scores.scores().value("A", "202.11"), Some(0.0));

    assert_relative_eq!(
        results.normalized.scores().value("A", "101.07").unwrap(),
        exclusive - 3.4,
        epsilon = 1e-12
    );
}

#[test]
fn test_single_detected_ion_group_is_left_missing() {
    let table = io::read_peak_table_from(TWO_GROUPS.as_bytes(), b',', "group", None).unwrap();
    let config = FacConfig::builder()
        .normalization(Normalization::Unnormalized)
        .build();
    let results = FacScore::new(&table, config).run().unwrap();

    // group B only has one ion with a positive mean: no z-score spread
    assert_eq!(results.zscores.row(1), &[None, None]);
    assert_eq!(results.raw_scores.max_value("B"), None);
}

#[test]
fn test_control_group_normalization_and_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("peaks.tsv");
    let output = dir.path().join("scores.tsv");
    fs::write(&input, WITH_CONTROL).unwrap();

    let config = FacConfig::builder().sample_column("sample").build();
    let table =
        io::read_peak_table(&input, &config.group_column, config.sample_column.as_deref()).unwrap();
    assert_eq!(table.n_samples(), 6);
    assert_eq!(table.n_ions(), 4);

    let results = FacScore::new(&table, config).run().unwrap();
    assert_eq!(results.normalized.groups(), &["A", "B", "dST"]);
    assert_eq!(results.normalized.max_value("dST"), Some(0.0));

    // both signals negative never contribute a positive score
    for (g, (_, row)) in results.zscores.rows().enumerate() {
        for (i, z) in row.iter().enumerate() {
            let r = results.log_ratios.get(g, i);
            if matches!((z, r), (Some(z), Some(r)) if *z < 0.0 && r < 0.0) {
                assert_eq!(results.raw_scores.scores().get(g, i), Some(0.0));
            }
        }
    }

    io::write_score_table(&output, &results.normalized).unwrap();
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("group\t101.07\t202.11\t303.15\t404.19\tmax_value\n"));

    let back = io::read_score_table(&output).unwrap();
    assert_eq!(back.groups(), results.normalized.groups());
    assert_eq!(back.ions(), results.normalized.ions());
    for g in 0..back.groups().len() {
        for i in 0..back.ions().len() {
            match (back.scores().get(g, i), results.normalized.scores().get(g, i)) {
                (Some(a), Some(b)) => assert_relative_eq!(a, b, epsilon = 1e-12),
                (a, b) => assert_eq!(a, b),
            }
        }
    }
    assert_eq!(back.max_values(), results.normalized.max_values());
}

#[test]
fn test_missing_control_group_is_reported() {
    let table = io::read_peak_table_from(TWO_GROUPS.as_bytes(), b',', "group", None).unwrap();
    let err = FacScore::new(&table, FacConfig::default()).run().unwrap_err();
    assert!(matches!(err, FacError::MissingReferenceGroup { label } if label == "dST"));
}

#[test]
fn test_malformed_input_is_rejected() {
    let data = "group,101.07\nA,12\nB,high\n";
    let err = io::read_peak_table_from(data.as_bytes(), b',', "group", None).unwrap_err();
    assert!(matches!(err, FacError::InvalidValue { row: 1, .. }));
}
