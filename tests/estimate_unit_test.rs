use fixturegen::estimate::{estimate, ContentParameter, EstimateParams};
use fixturegen::format::FileFormat;

fn params() -> EstimateParams {
    EstimateParams::default()
}

#[test]
fn test_txt_scales_linearly_with_target() {
    let small = estimate(FileFormat::Txt, 0.1, &params());
    let large = estimate(FileFormat::Txt, 1.0, &params());
    let (ContentParameter::Lines { count: a, .. }, ContentParameter::Lines { count: b, .. }) =
        (small, large)
    else {
        panic!("txt estimates lines");
    };
    // 10x the target is 10x the lines, within flooring error
    assert!(b / a >= 9 && b / a <= 10, "{a} vs {b}");
}

#[test]
fn test_pdf_discounts_for_structural_overhead() {
    let txt = estimate(FileFormat::Txt, 1.0, &params());
    let pdf = estimate(FileFormat::Pdf, 1.0, &params());
    let (ContentParameter::Lines { count: t, .. }, ContentParameter::Lines { count: p, .. }) =
        (txt, pdf)
    else {
        panic!("line-based estimates");
    };
    assert!(p < t);
    // 1 MiB / 80 chars with the 0.7 discount
    assert_eq!(t, 13107);
    assert_eq!(p, 9175);
}

#[test]
fn test_custom_chars_per_line_changes_count() {
    let narrow = estimate(
        FileFormat::Txt,
        0.5,
        &EstimateParams {
            chars_per_line: 40,
            ..EstimateParams::default()
        },
    );
    let wide = estimate(
        FileFormat::Txt,
        0.5,
        &EstimateParams {
            chars_per_line: 160,
            ..EstimateParams::default()
        },
    );
    let (ContentParameter::Lines { count: n, chars_per_line: 40 },
         ContentParameter::Lines { count: w, chars_per_line: 160 }) = (narrow, wide)
    else {
        panic!("line-based estimates");
    };
    // 0.5 MiB at 40 vs 160 chars per line
    assert_eq!(n, 13107);
    assert_eq!(w, 3276);
}

#[test]
fn test_docx_estimates_paragraphs() {
    match estimate(FileFormat::Docx, 0.3, &params()) {
        ContentParameter::Paragraphs {
            count,
            chars_per_paragraph,
        } => {
            // 0.3 MiB * 0.5 content fraction / 150 chars
            assert_eq!(count, 1048);
            assert_eq!(chars_per_paragraph, 150);
        }
        other => panic!("expected paragraphs, got {other:?}"),
    }
}

#[test]
fn test_xlsx_row_floor_holds_for_tiny_targets() {
    match estimate(FileFormat::Xlsx, 0.0001, &params()) {
        ContentParameter::Rows { count, columns } => {
            assert_eq!(count, 10);
            assert_eq!(columns, 7);
        }
        other => panic!("expected rows, got {other:?}"),
    }
    match estimate(FileFormat::Xlsx, 1.0, &params()) {
        ContentParameter::Rows { count, .. } => assert_eq!(count, 5200),
        other => panic!("expected rows, got {other:?}"),
    }
}

#[test]
fn test_jpeg_tiers_step_with_target() {
    let tiny = estimate(FileFormat::Jpeg, 0.05, &params());
    let mid = estimate(FileFormat::Jpeg, 0.8, &params());
    let huge = estimate(FileFormat::Jpeg, 20.0, &params());

    assert_eq!(tiny, ContentParameter::Resolution { width: 640, height: 480 });
    assert_eq!(mid, ContentParameter::Resolution { width: 1600, height: 1200 });
    // Beyond the last breakpoint the largest tier applies
    assert_eq!(huge, ContentParameter::Resolution { width: 3840, height: 2880 });
}

#[test]
fn test_nonpositive_target_clamps_to_minimum() {
    for format in FileFormat::ALL {
        let param = estimate(*format, -3.0, &params());
        match param {
            ContentParameter::Lines { count, .. } => assert!(count >= 1),
            ContentParameter::Paragraphs { count, .. } => assert!(count >= 1),
            ContentParameter::Rows { count, .. } => assert!(count >= 10),
            ContentParameter::Resolution { width, height } => {
                assert!(width >= 640 && height >= 480)
            }
        }
    }
}
