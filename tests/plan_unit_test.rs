use fixturegen::format::FileFormat;
use fixturegen::plan::{plan_percentages, plan_random, PercentageSpec};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn pct(format: FileFormat, value: f64) -> (PercentageSpec, f64) {
    (PercentageSpec::Format(format), value)
}

#[test]
fn test_exact_split_needs_no_adjustment() {
    let outcome = plan_percentages(
        10,
        &[pct(FileFormat::Txt, 50.0), pct(FileFormat::Pdf, 50.0)],
        &[FileFormat::Txt, FileFormat::Pdf],
    );
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.plan.count(FileFormat::Txt), 5);
    assert_eq!(outcome.plan.count(FileFormat::Pdf), 5);
}

#[test]
fn test_remainder_goes_to_largest_count() {
    // 20/70/10 over 9: floors 1/6/0, two left over, pdf holds the
    // largest count and absorbs both.
    let outcome = plan_percentages(
        9,
        &[
            pct(FileFormat::Txt, 20.0),
            pct(FileFormat::Pdf, 70.0),
            pct(FileFormat::Docx, 10.0),
        ],
        &[FileFormat::Txt, FileFormat::Pdf, FileFormat::Docx],
    );
    assert_eq!(outcome.plan.total(), 9);
    assert_eq!(outcome.plan.count(FileFormat::Pdf), 8);
    assert_eq!(outcome.plan.count(FileFormat::Txt), 1);
    assert_eq!(outcome.plan.count(FileFormat::Docx), 0);
}

#[test]
fn test_remainder_tie_takes_first_canonical_format() {
    // 33/33/34 over 10: floors 3/3/3, every count ties, the first
    // format in canonical order absorbs the leftover.
    let outcome = plan_percentages(
        10,
        &[
            pct(FileFormat::Txt, 33.0),
            pct(FileFormat::Docx, 33.0),
            pct(FileFormat::Pdf, 34.0),
        ],
        &[FileFormat::Txt, FileFormat::Docx, FileFormat::Pdf],
    );
    assert_eq!(outcome.plan.total(), 10);
    assert_eq!(outcome.plan.count(FileFormat::Txt), 4);
    assert_eq!(outcome.plan.count(FileFormat::Pdf), 3);
    assert_eq!(outcome.plan.count(FileFormat::Docx), 3);
}

#[test]
fn test_sum_preserved_across_awkward_totals() {
    let specs = [
        pct(FileFormat::Txt, 17.0),
        pct(FileFormat::Pdf, 29.0),
        pct(FileFormat::Docx, 31.0),
        (PercentageSpec::Remaining, 23.0),
    ];
    let active = FileFormat::ALL;
    for total in [1u64, 3, 13, 97, 1000] {
        let outcome = plan_percentages(total, &specs, active);
        assert_eq!(outcome.plan.total(), total, "total {total}");
    }
}

#[test]
fn test_off_sum_warns_but_proceeds() {
    let outcome = plan_percentages(
        10,
        &[pct(FileFormat::Txt, 60.0), pct(FileFormat::Pdf, 60.0)],
        &[FileFormat::Txt, FileFormat::Pdf],
    );
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("120.0"));
    assert_eq!(outcome.plan.total(), 10);
}

#[test]
fn test_oversubscribed_percentages_keep_exact_total() {
    for total in [1u64, 10, 97] {
        let outcome = plan_percentages(
            total,
            &[
                pct(FileFormat::Txt, 100.0),
                pct(FileFormat::Pdf, 100.0),
                pct(FileFormat::Docx, 100.0),
            ],
            FileFormat::ALL,
        );
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.plan.total(), total, "total {total}");
    }
}

#[test]
fn test_sum_within_tolerance_is_silent() {
    let outcome = plan_percentages(
        10,
        &[pct(FileFormat::Txt, 49.7), pct(FileFormat::Pdf, 49.8)],
        &[FileFormat::Txt, FileFormat::Pdf],
    );
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.plan.total(), 10);
}

#[test]
fn test_remaining_splits_over_unassigned_formats() {
    let outcome = plan_percentages(
        100,
        &[pct(FileFormat::Pdf, 60.0), (PercentageSpec::Remaining, 40.0)],
        &[FileFormat::Pdf, FileFormat::Txt, FileFormat::Jpeg],
    );
    assert_eq!(outcome.plan.count(FileFormat::Pdf), 60);
    assert_eq!(outcome.plan.count(FileFormat::Txt), 20);
    assert_eq!(outcome.plan.count(FileFormat::Jpeg), 20);
}

#[test]
fn test_random_plan_covers_total_and_only_active() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let active = [FileFormat::Txt, FileFormat::Xlsx];
    let plan = plan_random(50, &active, &mut rng);
    assert_eq!(plan.total(), 50);
    for (format, count) in plan.entries() {
        assert!(active.contains(format));
        assert!(*count > 0);
    }
}

#[test]
fn test_plan_entries_follow_canonical_order() {
    let outcome = plan_percentages(
        100,
        &[
            pct(FileFormat::Jpeg, 30.0),
            pct(FileFormat::Txt, 40.0),
            pct(FileFormat::Pdf, 30.0),
        ],
        FileFormat::ALL,
    );
    let formats: Vec<FileFormat> = outcome.plan.entries().iter().map(|(f, _)| *f).collect();
    assert_eq!(
        formats,
        vec![FileFormat::Txt, FileFormat::Pdf, FileFormat::Jpeg]
    );
}
