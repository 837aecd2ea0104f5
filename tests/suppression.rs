use detpost::{suppress, Candidate, Rect, SuppressionScope};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn candidate(label_index: usize, confidence: f32, rect: Rect) -> Candidate {
    Candidate {
        label_index,
        confidence,
        rect,
    }
}

fn random_candidates(rng: &mut StdRng, count: usize, num_classes: usize) -> Vec<Candidate> {
    (0..count)
        .map(|_| {
            let cx = rng.random_range(0.0..200.0f32);
            let cy = rng.random_range(0.0..200.0f32);
            let w = rng.random_range(5.0..60.0f32);
            let h = rng.random_range(5.0..60.0f32);
            candidate(
                rng.random_range(0..num_classes),
                rng.random_range(0.0..1.0f32),
                Rect::from_center(cx, cy, w, h),
            )
        })
        .collect()
}

#[test]
fn identical_boxes_keep_highest_confidence() {
    let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
    let candidates = vec![candidate(0, 0.6, rect), candidate(1, 0.9, rect)];

    let kept = suppress(&candidates, 0.01, SuppressionScope::Global);

    assert_eq!(kept.len(), 1);
    assert!((kept[0].confidence - 0.9).abs() < 1e-6);
    assert_eq!(kept[0].label_index, 1);
}

#[test]
fn survivors_never_overlap_beyond_threshold() {
    let mut rng = StdRng::seed_from_u64(7);
    let iou_threshold = 0.3;

    for _ in 0..20 {
        let candidates = random_candidates(&mut rng, 60, 4);
        let kept = suppress(&candidates, iou_threshold, SuppressionScope::Global);

        for (i, a) in kept.iter().enumerate() {
            for b in kept.iter().skip(i + 1) {
                assert!(a.rect.iou(&b.rect) <= iou_threshold);
            }
        }
    }
}

#[test]
fn suppression_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let candidates = random_candidates(&mut rng, 50, 3);
        let once = suppress(&candidates, 0.2, SuppressionScope::Global);
        let twice = suppress(&once, 0.2, SuppressionScope::Global);
        assert_eq!(once, twice);
    }
}

#[test]
fn output_is_sorted_by_descending_confidence() {
    let mut rng = StdRng::seed_from_u64(3);
    let candidates = random_candidates(&mut rng, 40, 4);

    let kept = suppress(&candidates, 0.5, SuppressionScope::Global);
    for pair in kept.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn per_class_scope_keeps_cross_class_overlaps() {
    let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
    let candidates = vec![candidate(0, 0.9, rect), candidate(1, 0.6, rect)];

    let global = suppress(&candidates, 0.01, SuppressionScope::Global);
    assert_eq!(global.len(), 1);

    let per_class = suppress(&candidates, 0.01, SuppressionScope::PerClass);
    assert_eq!(per_class.len(), 2);
}

#[test]
fn per_class_scope_still_suppresses_same_label() {
    let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
    let candidates = vec![candidate(2, 0.9, rect), candidate(2, 0.6, rect)];

    let kept = suppress(&candidates, 0.01, SuppressionScope::PerClass);
    assert_eq!(kept.len(), 1);
    assert!((kept[0].confidence - 0.9).abs() < 1e-6);
}

#[test]
fn equal_confidences_preserve_input_order() {
    // Disjoint boxes so nothing suppresses; the stable sort must keep the
    // original order among equal confidences.
    let candidates = vec![
        candidate(0, 0.5, Rect::new(0.0, 0.0, 5.0, 5.0)),
        candidate(1, 0.5, Rect::new(50.0, 50.0, 5.0, 5.0)),
        candidate(2, 0.5, Rect::new(100.0, 100.0, 5.0, 5.0)),
    ];

    let kept = suppress(&candidates, 0.01, SuppressionScope::Global);
    let labels: Vec<usize> = kept.iter().map(|c| c.label_index).collect();
    assert_eq!(labels, vec![0, 1, 2]);
}

#[test]
fn iou_threshold_is_strict() {
    // Two boxes engineered to an IoU of exactly 1/3.
    let a = candidate(0, 0.9, Rect::new(0.0, 0.0, 2.0, 1.0));
    let b = candidate(1, 0.8, Rect::new(1.0, 0.0, 2.0, 1.0));
    let candidates = vec![a, b];

    let third = 1.0f32 / 3.0;
    let kept = suppress(&candidates, third, SuppressionScope::Global);
    assert_eq!(kept.len(), 2);

    let kept = suppress(&candidates, third - 1e-4, SuppressionScope::Global);
    assert_eq!(kept.len(), 1);
}

#[test]
fn empty_input_yields_empty_output() {
    let kept = suppress(&[], 0.01, SuppressionScope::Global);
    assert!(kept.is_empty());
}
