//! Perfect Circle scoring
//!
//! A freehand stroke is fitted to a circle centred on the stroke centroid with
//! radius equal to the mean point distance. Roughness is the mean absolute
//! radius deviation relative to that radius, which makes the score independent
//! of where the circle was drawn and how big it is.

use serde::{Deserialize, Serialize};

use crate::consts::MIN_STROKE_POINTS;
use crate::{Point, centroid};

/// Radius below this fraction of the largest coordinate is rounding noise
const DEGENERATE_RADIUS_RATIO: f32 = 16.0 * f32::EPSILON;

/// Result of fitting a stroke to a circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    /// Accuracy in [0, 100]
    pub score: f32,
    /// Fitted centre (stroke centroid)
    pub center: Point,
    /// Fitted radius (mean distance to centre)
    pub radius: f32,
    /// Mean |r - radius| / radius, None when the stroke could not be scored
    pub relative_deviation: Option<f32>,
}

impl CircleFit {
    fn unscored(center: Point, radius: f32) -> Self {
        Self {
            score: 0.0,
            center,
            radius,
            relative_deviation: None,
        }
    }

    /// True when the stroke was too short or collapsed to a point
    pub fn is_degenerate(&self) -> bool {
        self.relative_deviation.is_none()
    }

    /// Rating tier for this fit
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.score)
    }
}

/// Score a stroke against its best-fit circle
///
/// Strokes with fewer than five points, whose points all coincide, or that
/// contain a non-finite coordinate score 0.
pub fn evaluate(points: &[Point]) -> CircleFit {
    let Some(center) = centroid(points) else {
        return CircleFit::unscored(Point::ZERO, 0.0);
    };

    if points.len() < MIN_STROKE_POINTS {
        log::debug!("Not enough points to score: {}", points.len());
        return CircleFit::unscored(center, 0.0);
    }

    let n = points.len() as f32;
    let radii: Vec<f32> = points.iter().map(|p| p.distance(center)).collect();
    let avg_radius = radii.iter().sum::<f32>() / n;

    // Collapsed relative to the coordinate magnitude, or poisoned by a non-finite point
    let scale = points
        .iter()
        .fold(0.0f32, |m, p| m.max(p.abs().max_element()));
    if !avg_radius.is_finite() || avg_radius <= scale * DEGENERATE_RADIUS_RATIO {
        log::debug!("Degenerate stroke: {} points, radius {}", points.len(), avg_radius);
        return CircleFit::unscored(center, 0.0);
    }

    let avg_deviation = radii.iter().map(|r| (r - avg_radius).abs()).sum::<f32>() / n;
    let relative_deviation = avg_deviation / avg_radius;

    log::debug!(
        "Circle fit: points={}, avg_radius={:.2}, avg_deviation={:.2}, relative_deviation={:.3}",
        points.len(),
        avg_radius,
        avg_deviation,
        relative_deviation
    );

    let score = score_from_deviation(relative_deviation);
    log::debug!("Final accuracy: {:.1}", score);

    CircleFit {
        score,
        center,
        radius: avg_radius,
        relative_deviation: Some(relative_deviation),
    }
}

/// Map relative deviation to a score with four continuous linear segments
///
/// | deviation   | score    |
/// |-------------|----------|
/// | 0 - 0.05    | 100 - 90 |
/// | 0.05 - 0.15 | 90 - 60  |
/// | 0.15 - 0.30 | 60 - 20  |
/// | 0.30 - 0.50 | 20 - 0   |
pub fn score_from_deviation(rd: f32) -> f32 {
    let rd = rd.max(0.0);
    let score = if rd <= 0.05 {
        100.0 - (rd / 0.05) * 10.0
    } else if rd <= 0.15 {
        90.0 - ((rd - 0.05) / 0.10) * 30.0
    } else if rd <= 0.30 {
        60.0 - ((rd - 0.15) / 0.15) * 40.0
    } else {
        (20.0 - ((rd - 0.30) / 0.20) * 20.0).max(0.0)
    };
    score.clamp(0.0, 100.0)
}

/// Pointer positions captured during one drag gesture
#[derive(Debug, Clone, Default)]
pub struct Stroke {
    points: Vec<Point>,
    drawing: bool,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new gesture at the pointer-down location
    pub fn begin(&mut self, point: Point) {
        self.points.clear();
        self.points.push(point);
        self.drawing = true;
    }

    /// Append a pointer-move sample (ignored when not drawing)
    pub fn push(&mut self, point: Point) {
        if self.drawing {
            self.points.push(point);
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// End the gesture and score it
    ///
    /// Returns None if no gesture was in progress or it was too short to count,
    /// in which case the caller should simply let the player try again.
    pub fn finish(&mut self) -> Option<CircleFit> {
        let was_drawing = std::mem::replace(&mut self.drawing, false);
        if !was_drawing || self.points.len() < MIN_STROKE_POINTS {
            return None;
        }
        Some(evaluate(&self.points))
    }

    /// Discard everything captured so far
    pub fn clear(&mut self) {
        self.points.clear();
        self.drawing = false;
    }
}

/// Rating tier shown with a circle score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    PracticeMore,
    KeepTrying,
    NotBad,
    Good,
    Great,
    Excellent,
    Perfect,
}

impl Grade {
    pub fn from_score(score: f32) -> Self {
        match score {
            s if s >= 95.0 => Grade::Perfect,
            s if s >= 90.0 => Grade::Excellent,
            s if s >= 80.0 => Grade::Great,
            s if s >= 70.0 => Grade::Good,
            s if s >= 60.0 => Grade::NotBad,
            s if s >= 50.0 => Grade::KeepTrying,
            _ => Grade::PracticeMore,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::Perfect => "Perfect! 🎯",
            Grade::Excellent => "Excellent! 🌟",
            Grade::Great => "Great! 👍",
            Grade::Good => "Good! 👌",
            Grade::NotBad => "Not bad! 🙂",
            Grade::KeepTrying => "Keep trying! 💪",
            Grade::PracticeMore => "Practice more! 📈",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::TAU;

    fn circle_points(center: Point, radius: f32, n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let theta = i as f32 / n as f32 * TAU;
                center + radius * Point::new(theta.cos(), theta.sin())
            })
            .collect()
    }

    fn ellipse_points(center: Point, rx: f32, ry: f32, n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let theta = i as f32 / n as f32 * TAU;
                center + Point::new(rx * theta.cos(), ry * theta.sin())
            })
            .collect()
    }

    #[test]
    fn test_perfect_circle_scores_100() {
        let points = circle_points(Point::new(200.0, 200.0), 100.0, 8);
        let fit = evaluate(&points);
        assert!((fit.score - 100.0).abs() < 0.01, "score was {}", fit.score);
        assert!(fit.center.distance(Point::new(200.0, 200.0)) < 0.01);
        assert!((fit.radius - 100.0).abs() < 0.01);
        assert_eq!(fit.grade(), Grade::Perfect);
    }

    #[test]
    fn test_ellipse_scores_between() {
        let points = ellipse_points(Point::new(200.0, 200.0), 120.0, 80.0, 8);
        let fit = evaluate(&points);
        assert!(fit.score > 0.0 && fit.score < 100.0, "score was {}", fit.score);
        // rd ~= 0.104 lands in the 60-90 band
        assert!(fit.score > 60.0 && fit.score < 90.0, "score was {}", fit.score);
    }

    #[test]
    fn test_short_stroke_scores_zero() {
        for n in 0..MIN_STROKE_POINTS {
            let points = circle_points(Point::new(50.0, 50.0), 40.0, n);
            let fit = evaluate(&points);
            assert_eq!(fit.score, 0.0);
            assert!(fit.is_degenerate());
        }
    }

    #[test]
    fn test_coincident_points_score_zero() {
        let points = vec![Point::new(10.0, 10.0); 12];
        let fit = evaluate(&points);
        assert_eq!(fit.score, 0.0);
        assert!(fit.is_degenerate());
        assert_eq!(fit.center, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_tiny_circle_still_scores() {
        let points: Vec<Point> = circle_points(Point::ZERO, 1.0, 64)
            .into_iter()
            .map(|p| p * 1e-10)
            .collect();
        let fit = evaluate(&points);
        assert!(!fit.is_degenerate());
        assert!(fit.score > 99.0, "score {}", fit.score);
    }

    #[test]
    fn test_coincident_off_origin_scores_zero() {
        let fit = evaluate(&[Point::new(0.1, 0.1); 7]);
        assert!(fit.is_degenerate());
        assert_eq!(fit.score, 0.0);

        let fit = evaluate(&[Point::new(1.0e6, -3.0e5); 7]);
        assert!(fit.is_degenerate());
    }

    #[test]
    fn test_non_finite_point_scores_zero() {
        for bad in [f32::NAN, f32::INFINITY] {
            let mut points = circle_points(Point::new(200.0, 200.0), 50.0, 32);
            points[5] = Point::new(bad, 200.0);
            let fit = evaluate(&points);
            assert!(fit.is_degenerate());
            assert_eq!(fit.score, 0.0);
        }
    }

    #[test]
    fn test_centroid_not_first_point() {
        // Starting the stroke off to one side must not bias the fit
        let mut points = circle_points(Point::new(300.0, 100.0), 60.0, 32);
        points.rotate_left(7);
        let fit = evaluate(&points);
        assert!(fit.center.distance(Point::new(300.0, 100.0)) < 0.01);
        assert!(fit.score > 99.0);
    }

    #[test]
    fn test_segments_are_continuous() {
        for boundary in [0.05_f32, 0.15, 0.30] {
            let below = score_from_deviation(boundary - 1e-5);
            let above = score_from_deviation(boundary + 1e-5);
            assert!((below - above).abs() < 0.01, "jump at {boundary}");
        }
        assert_eq!(score_from_deviation(0.0), 100.0);
        assert!((score_from_deviation(0.05) - 90.0).abs() < 1e-4);
        assert!((score_from_deviation(0.15) - 60.0).abs() < 1e-4);
        assert!((score_from_deviation(0.30) - 20.0).abs() < 1e-4);
        assert!(score_from_deviation(0.5) < 1e-4);
        assert_eq!(score_from_deviation(3.0), 0.0);
    }

    #[test]
    fn test_stroke_capture() {
        let mut stroke = Stroke::new();
        stroke.push(Point::new(1.0, 1.0));
        assert!(stroke.is_empty(), "push before begin is ignored");

        let points = circle_points(Point::new(100.0, 100.0), 50.0, 16);
        stroke.begin(points[0]);
        for p in &points[1..] {
            stroke.push(*p);
        }
        assert_eq!(stroke.len(), 16);

        let fit = stroke.finish().expect("long stroke is scored");
        assert!(fit.score > 99.0);
        assert!(!stroke.is_drawing());
        assert!(stroke.finish().is_none(), "second finish has nothing to score");
    }

    #[test]
    fn test_short_stroke_finish_is_ignored() {
        let mut stroke = Stroke::new();
        stroke.begin(Point::new(0.0, 0.0));
        stroke.push(Point::new(1.0, 0.0));
        stroke.push(Point::new(1.0, 1.0));
        assert!(stroke.finish().is_none());
    }

    #[test]
    fn test_grade_tiers() {
        assert_eq!(Grade::from_score(100.0), Grade::Perfect);
        assert_eq!(Grade::from_score(92.0), Grade::Excellent);
        assert_eq!(Grade::from_score(85.0), Grade::Great);
        assert_eq!(Grade::from_score(70.0), Grade::Good);
        assert_eq!(Grade::from_score(65.0), Grade::NotBad);
        assert_eq!(Grade::from_score(50.0), Grade::KeepTrying);
        assert_eq!(Grade::from_score(12.0), Grade::PracticeMore);
        assert!(Grade::Perfect > Grade::Good);
    }

    fn wobbly_stroke() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((0.6f32..1.4, 0.0f32..TAU), 5..64).prop_map(|samples| {
            samples
                .into_iter()
                .map(|(r, theta)| 100.0 * r * Point::new(theta.cos(), theta.sin()))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_score_in_range(points in wobbly_stroke()) {
            let fit = evaluate(&points);
            prop_assert!((0.0..=100.0).contains(&fit.score));
        }

        #[test]
        fn prop_translation_invariant(
            points in wobbly_stroke(),
            dx in -2000.0f32..2000.0,
            dy in -2000.0f32..2000.0,
        ) {
            let base = evaluate(&points);
            let offset = Point::new(dx, dy);
            let moved: Vec<Point> = points.iter().map(|p| *p + offset).collect();
            let fit = evaluate(&moved);
            prop_assert!((base.score - fit.score).abs() < 0.5, "{} vs {}", base.score, fit.score);
        }

        #[test]
        fn prop_scale_invariant(points in wobbly_stroke(), k in 0.1f32..20.0) {
            let base = evaluate(&points);
            let scaled: Vec<Point> = points.iter().map(|p| *p * k).collect();
            let fit = evaluate(&scaled);
            prop_assert!((base.score - fit.score).abs() < 0.5, "{} vs {}", base.score, fit.score);
        }

        #[test]
        fn prop_exact_circle_is_perfect(
            cx in -500.0f32..500.0,
            cy in -500.0f32..500.0,
            r in 10.0f32..400.0,
            n in 5usize..100,
        ) {
            let fit = evaluate(&circle_points(Point::new(cx, cy), r, n));
            prop_assert!(fit.score > 99.5, "score was {}", fit.score);
        }
    }
}
