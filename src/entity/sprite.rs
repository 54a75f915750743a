//! Sprite entity: a clipped region of the shared sprite sheet

use std::rc::{Rc, Weak};

use super::{Drawable, Entity};
use crate::assets::SpriteSheet;
use crate::assets::regions::Region;
use crate::surface::{Rect, Surface};

#[derive(Debug, Clone)]
pub struct SpriteEntity {
    pub entity: Entity,
    width: u32,
    height: u32,
    clip_x: u32,
    clip_y: u32,
    image: Option<Weak<SpriteSheet>>,
}

impl SpriteEntity {
    pub fn new(x: f64, y: f64, width: u32, height: u32) -> Self {
        Self {
            entity: Entity::new(x, y),
            width: width.max(1),
            height: height.max(1),
            clip_x: 0,
            clip_y: 0,
            image: None,
        }
    }

    /// Sprite at `(x, y)` showing `region` of `sheet`
    pub fn from_region(sheet: &Rc<SpriteSheet>, region: Region, x: f64, y: f64) -> Self {
        let (clip_x, clip_y, w, h) = region;
        let mut sprite = Self::new(x, y, w, h);
        sprite.set_clip(clip_x, clip_y);
        sprite.set_image(sheet);
        sprite
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn clip(&self) -> (u32, u32) {
        (self.clip_x, self.clip_y)
    }

    pub fn set_clip(&mut self, clip_x: u32, clip_y: u32) {
        self.clip_x = clip_x;
        self.clip_y = clip_y;
    }

    /// Reference the sheet without taking ownership of it
    pub fn set_image(&mut self, sheet: &Rc<SpriteSheet>) {
        self.image = Some(Rc::downgrade(sheet));
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn has_image(&self) -> bool {
        self.image.as_ref().is_some_and(|w| w.strong_count() > 0)
    }

    fn source_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.clip_x),
            f64::from(self.clip_y),
            f64::from(self.width),
            f64::from(self.height),
        )
    }

    fn dest_rect(&self) -> Rect {
        Rect::new(
            self.entity.x(),
            self.entity.y(),
            f64::from(self.width),
            f64::from(self.height),
        )
    }
}

impl Drawable for SpriteEntity {
    fn update(&mut self, _dt: f64) {}

    fn render(&self, surface: &mut dyn Surface) {
        let Some(sheet) = self.image.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        if !sheet.is_ready() {
            return;
        }
        surface.draw_image_region(&sheet, self.source_rect(), self.dest_rect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::regions;
    use crate::surface::{DrawCall, RecordingSurface};

    #[test]
    fn test_no_image_draws_nothing() {
        let sprite = SpriteEntity::new(0.0, 0.0, 16, 16);
        let mut surface = RecordingSurface::new();
        sprite.render(&mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_unready_image_draws_nothing() {
        let sheet = Rc::new(SpriteSheet::new("sprites.png"));
        let sprite = SpriteEntity::from_region(&sheet, regions::SQUID, 10.0, 20.0);
        let mut surface = RecordingSurface::new();

        sprite.render(&mut surface);
        assert!(surface.calls.is_empty());

        sheet.mark_ready();
        sprite.render(&mut surface);
        assert_eq!(surface.image_count(), 1);
    }

    #[test]
    fn test_blits_clip_to_position_unscaled() {
        let sheet = Rc::new(SpriteSheet::new("sprites.png"));
        sheet.mark_ready();
        let mut sprite = SpriteEntity::new(100.0, 50.0, 22, 16);
        sprite.set_clip(16, 0);
        sprite.set_image(&sheet);

        let mut surface = RecordingSurface::new();
        sprite.render(&mut surface);

        assert_eq!(
            surface.calls,
            vec![DrawCall::Image {
                path: "sprites.png".to_string(),
                src: Rect::new(16.0, 0.0, 22.0, 16.0),
                dst: Rect::new(100.0, 50.0, 22.0, 16.0),
            }]
        );
    }

    #[test]
    fn test_sprite_does_not_keep_sheet_alive() {
        let sheet = Rc::new(SpriteSheet::new("sprites.png"));
        let sprite = SpriteEntity::from_region(&sheet, regions::CANNON, 0.0, 0.0);
        assert!(sprite.has_image());
        assert_eq!(Rc::strong_count(&sheet), 1);

        drop(sheet);
        assert!(!sprite.has_image());
        let mut surface = RecordingSurface::new();
        sprite.render(&mut surface);
        assert!(surface.calls.is_empty());
    }
}
