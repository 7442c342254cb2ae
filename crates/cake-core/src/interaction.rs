use crate::candle::Candle;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Distance along a unit ray to the first sphere intersection in front of
/// the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest lit flame hit by `ray`, as `(candle index, distance)`.
/// Extinguished candles never take part.
pub fn pick_flame(candles: &[Candle], ray: &Ray) -> Option<(usize, f32)> {
    let mut best = None::<(usize, f32)>;
    for candle in candles.iter().filter(|c| !c.is_out()) {
        let (center, radius) = candle.hit_sphere();
        if let Some(t) = ray_sphere(ray.origin, ray.dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((candle.index(), t)),
            }
        }
    }
    best
}

/// Map a pointer position inside an element rectangle to NDC (y up).
#[inline]
pub fn client_to_ndc(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    let local = (client - rect_origin) / rect_size;
    Some(Vec2::new(local.x * 2.0 - 1.0, 1.0 - local.y * 2.0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Every candle is already out; the click was not hit-tested.
    Ignored,
    Miss,
    Extinguished { index: usize, won: bool },
}
