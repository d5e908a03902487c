//! Screen geometry the core needs for hit testing: the enemy hit region and
//! the shop's BUY buttons. Drawing itself lives outside the crate.

use crate::character::perks::PerkStat;
use crate::core::constants::{
    BUY_BUTTON_OFFSET, BUY_BUTTON_SIZE, SHOP_BOX_MARGIN, SHOP_BOX_WIDTH, SHOP_BOX_Y,
    SHOP_PERK_INSET_X, SHOP_PERK_INSET_Y, SHOP_PERK_SPACING,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn centered(center: Point, size: (i32, i32)) -> Self {
        Self::new(
            center.x - size.0 / 2,
            center.y - size.1 / 2,
            size.0,
            size.1,
        )
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Inclusive containment used by the shop buttons.
    pub fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// A BUY button bound to one perk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopButton {
    pub rect: Rect,
    pub perk: PerkStat,
}

/// BUY buttons for the four perks, top to bottom in shop order.
pub fn shop_buttons(display_width: i32) -> [ShopButton; 4] {
    let shop_x = display_width - SHOP_BOX_WIDTH - SHOP_BOX_MARGIN;
    let perk_x = shop_x + SHOP_PERK_INSET_X;
    let first_y = SHOP_BOX_Y + SHOP_PERK_INSET_Y;

    PerkStat::all().map(|perk| {
        let perk_y = first_y + perk.shop_index() as i32 * SHOP_PERK_SPACING;
        ShopButton {
            rect: Rect::new(
                perk_x + BUY_BUTTON_OFFSET.0,
                perk_y + BUY_BUTTON_OFFSET.1,
                BUY_BUTTON_SIZE.0,
                BUY_BUTTON_SIZE.1,
            ),
            perk,
        }
    })
}

/// Finds the BUY button under `point`, if any.
pub fn button_at(display_width: i32, point: Point) -> Option<PerkStat> {
    shop_buttons(display_width)
        .iter()
        .find(|button| button.rect.contains_inclusive(point))
        .map(|button| button.perk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DISPLAY_WIDTH;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains(Point::new(0, 0)));
        assert!(rect.contains(Point::new(9, 9)));
        assert!(!rect.contains(Point::new(10, 5)));
        assert!(!rect.contains(Point::new(5, 10)));
        assert!(!rect.contains(Point::new(-1, 5)));
    }

    #[test]
    fn test_rect_centered() {
        let rect = Rect::centered(Point::new(380, 300), (250, 250));
        assert_eq!(rect, Rect::new(255, 175, 250, 250));
        assert_eq!(rect.center(), Point::new(380, 300));
    }

    #[test]
    fn test_shop_buttons_layout() {
        let buttons = shop_buttons(DISPLAY_WIDTH);
        assert_eq!(buttons[0].perk, PerkStat::CriticalRate);
        assert_eq!(buttons[0].rect, Rect::new(640, 122, 60, 20));
        assert_eq!(buttons[3].perk, PerkStat::BaseDamage);
        assert_eq!(buttons[3].rect, Rect::new(640, 422, 60, 20));
    }

    #[test]
    fn test_button_at_edges_inclusive() {
        assert_eq!(
            button_at(DISPLAY_WIDTH, Point::new(640, 122)),
            Some(PerkStat::CriticalRate)
        );
        assert_eq!(
            button_at(DISPLAY_WIDTH, Point::new(700, 142)),
            Some(PerkStat::CriticalRate)
        );
        assert_eq!(
            button_at(DISPLAY_WIDTH, Point::new(670, 232)),
            Some(PerkStat::CriticalDamage)
        );
        assert_eq!(button_at(DISPLAY_WIDTH, Point::new(639, 122)), None);
        assert_eq!(button_at(DISPLAY_WIDTH, Point::new(380, 300)), None);
    }
}
