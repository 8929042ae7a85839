use mdplot::data::category::MetricCategory;
use mdplot::data::xvg::{is_metadata_line, parse_file, parse_str, ParseError, ParseOutcome};

const RMSD_FILE: &str = "\
# This file was created Tue Mar  4 10:12:01 2025
#   gmx rms -s step5_1.tpr -f analisis.xtc -o RMSD/rmsd.xvg -tu ns
@    title \"RMSD\"
@    xaxis  label \"Time (ns)\"
@    yaxis  label \"RMSD (nm)\"
@TYPE xy
@ subtitle \"Backbone after lsq fit to Backbone\"
   0.0000000    0.0005198
   0.1000000    0.0812317
   0.2000000    0.0953112
";

fn series(text: &str) -> mdplot::data::xvg::RawSeries {
    match parse_str(text).unwrap() {
        ParseOutcome::Series(s) => s,
        other => panic!("expected a series, got {other:?}"),
    }
}

#[test]
fn parses_rows_and_infers_category() {
    let s = series(RMSD_FILE);
    assert_eq!(s.category, Some(MetricCategory::Rmsd));
    assert_eq!(
        s.points,
        vec![[0.0, 0.0005198], [0.1, 0.0812317], [0.2, 0.0953112]]
    );
}

#[test]
fn metadata_lines_are_recognised() {
    assert!(is_metadata_line("@    title \"RMSD\""));
    assert!(is_metadata_line("# comment"));
    assert!(!is_metadata_line("  1.0 2.0"));
}

#[test]
fn last_marker_wins() {
    let text = "# Hydrogen bonds\n# written to rmsd.xvg\n0 1\n";
    assert_eq!(series(text).category, Some(MetricCategory::Rmsd));

    let flipped = "# written to rmsd.xvg\n# Hydrogen bonds\n0 1\n";
    assert_eq!(series(flipped).category, Some(MetricCategory::HydrogenBonds));
}

#[test]
fn last_marker_wins_for_overlapping_rmsd_names() {
    let text = "# gmx rms -o RMSD/rmsd.xvg\n# gmx rms -o rmsd_pro_lig/rmsd_pro_lig.xvg\n0 1\n";
    assert_eq!(series(text).category, Some(MetricCategory::RmsdProteinLigand));

    let flipped = "# gmx rms -o rmsd_pro_lig/rmsd_pro_lig.xvg\n# gmx rms -o RMSD/rmsd.xvg\n0 1\n";
    assert_eq!(series(flipped).category, Some(MetricCategory::Rmsd));
}

#[test]
fn specific_marker_beats_its_suffix() {
    let text = "#   gmx rms -o rmsd_pro_lig/rmsd_pro_lig.xvg -tu ns\n0 1\n";
    assert_eq!(series(text).category, Some(MetricCategory::RmsdProteinLigand));
}

#[test]
fn unknown_file_has_no_category() {
    let s = series("@ title \"something else\"\n1 2\n");
    assert_eq!(s.category, None);
}

#[test]
fn extra_columns_and_blank_lines_are_ignored() {
    let text = "\
@    title \"Radius of gyration (total and around axes)\"
0.000  2.1033  1.5311  1.8260  1.7801

10.000 2.1107  1.5402  1.8199  1.7866
";
    let s = series(text);
    assert_eq!(s.category, Some(MetricCategory::Gyration));
    assert_eq!(s.points, vec![[0.0, 2.1033], [10.0, 2.1107]]);
}

#[test]
fn malformed_row_fails_the_file() {
    let err = parse_str("# rmsd.xvg\n0 1\n1 abc\n2 3\n").unwrap_err();
    match err {
        ParseError::Row { line, content } => {
            assert_eq!(line, 3);
            assert_eq!(content, "1 abc");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn single_column_row_is_malformed() {
    assert!(matches!(
        parse_str("0.5\n"),
        Err(ParseError::Row { line: 1, .. })
    ));
}

#[test]
fn file_without_rows_is_empty_not_an_error() {
    let outcome = parse_str("@ title \"Solvent Accessible Surface\"\n# nothing\n").unwrap();
    assert_eq!(
        outcome,
        ParseOutcome::Empty {
            category: Some(MetricCategory::Sasa)
        }
    );
}

#[test]
fn reparse_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run1.xvg");
    std::fs::write(&path, RMSD_FILE).unwrap();
    let first = parse_file(&path).unwrap();
    let second = parse_file(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(&dir.path().join("absent.xvg")).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}
