use pinchpan_common::{Bounds, Vec2};

/// Answers whether a screen point is covered by UI.
pub trait UiHitTest {
    fn is_over_ui(&self, point: Vec2) -> bool;
}

impl<F> UiHitTest for F
where
    F: Fn(Vec2) -> bool,
{
    fn is_over_ui(&self, point: Vec2) -> bool {
        self(point)
    }
}

/// UI described as a list of screen-space rectangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiRegions {
    regions: Vec<Bounds>,
}

impl UiRegions {
    pub fn new(regions: Vec<Bounds>) -> Self {
        Self { regions }
    }

    pub fn push(&mut self, region: Bounds) {
        self.regions.push(region);
    }
}

impl UiHitTest for UiRegions {
    fn is_over_ui(&self, point: Vec2) -> bool {
        self.regions.iter().any(|r| r.contains_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions() {
        let mut ui = UiRegions::new(vec![Bounds::new(0.0, 100.0, 0.0, 40.0)]);
        assert!(ui.is_over_ui(Vec2::new(50.0, 20.0)));
        assert!(!ui.is_over_ui(Vec2::new(50.0, 41.0)));

        ui.push(Bounds::new(0.0, 100.0, 500.0, 600.0));
        assert!(ui.is_over_ui(Vec2::new(10.0, 550.0)));
    }

    #[test]
    fn test_closure_hit_test() {
        let ui = |p: Vec2| p.x < 10.0;
        assert!(ui.is_over_ui(Vec2::new(5.0, 0.0)));
        assert!(!ui.is_over_ui(Vec2::new(15.0, 0.0)));
    }
}
