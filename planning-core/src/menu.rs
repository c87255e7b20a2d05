//! Context menu placement and actions.

/// Gap kept between a repositioned menu and the viewport edge, in pixels.
pub const MENU_MARGIN: f32 = 10.0;

/// A position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

/// Actions offered by the event context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Duplicate,
    Delete,
    Dismiss,
}

/// Where to render a menu of size `menu` opened at `anchor`.
///
/// A menu that would overflow the right or bottom edge is shifted left/up by
/// exactly the overflow so it ends flush with that edge, and a shifted origin
/// never goes closer than `MENU_MARGIN` to the left/top edge.
pub fn place_menu(anchor: Point, menu: Size, viewport: Size) -> Point {
    Point {
        x: place_axis(anchor.x, menu.width, viewport.width),
        y: place_axis(anchor.y, menu.height, viewport.height),
    }
}

fn place_axis(origin: f32, extent: f32, limit: f32) -> f32 {
    let overflow = origin + extent - limit;
    if overflow > 0.0 {
        (origin - overflow).max(MENU_MARGIN)
    } else {
        origin.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn shifts_left_when_overflowing_right_edge() {
        let placed = place_menu(Point::new(950.0, 100.0), Size::new(300.0, 120.0), VIEWPORT);

        assert!(placed.x + 300.0 <= 1000.0);
        assert_eq!(placed.x, 700.0);
        assert_eq!(placed.y, 100.0);
    }

    #[test]
    fn shifts_up_when_overflowing_bottom_edge() {
        let placed = place_menu(Point::new(100.0, 780.0), Size::new(200.0, 150.0), VIEWPORT);

        assert_eq!(placed, Point::new(100.0, 650.0));
    }

    #[test]
    fn leaves_fitting_menu_in_place() {
        let anchor = Point::new(400.0, 300.0);
        assert_eq!(place_menu(anchor, Size::new(200.0, 150.0), VIEWPORT), anchor);
    }

    #[test]
    fn oversized_menu_is_clamped_to_margin() {
        let placed = place_menu(Point::new(500.0, 500.0), Size::new(1200.0, 900.0), VIEWPORT);

        assert_eq!(placed, Point::new(MENU_MARGIN, MENU_MARGIN));
    }
}
