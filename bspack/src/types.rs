use crate::geometry::Rect;

/// Anything that can be packed: the packer only ever reads a width and a
/// height.
///
/// Applications implement `Sizable` for their own image or sprite types and
/// get those same values back, paired with a position, from
/// [`pack`](fn.pack.html).
///
/// Sizes should be finite. An item reporting an infinite or NaN dimension
/// never fits and is returned as a [`PackOverflow`](struct.PackOverflow.html).
pub trait Sizable {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    #[inline]
    fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// A bare width and height, for callers that don't have a type of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Sizable for Size {
    #[inline]
    fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    fn height(&self) -> f64 {
        self.height
    }
}

impl Sizable for (f64, f64) {
    #[inline]
    fn width(&self) -> f64 {
        self.0
    }

    #[inline]
    fn height(&self) -> f64 {
        self.1
    }
}

impl Sizable for (u32, u32) {
    #[inline]
    fn width(&self) -> f64 {
        f64::from(self.0)
    }

    #[inline]
    fn height(&self) -> f64 {
        f64::from(self.1)
    }
}

impl<T: Sizable + ?Sized> Sizable for &T {
    #[inline]
    fn width(&self) -> f64 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> f64 {
        (**self).height()
    }
}

impl<T: Sizable + ?Sized> Sizable for Box<T> {
    #[inline]
    fn width(&self) -> f64 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> f64 {
        (**self).height()
    }
}

/// An item that was placed by the packer.
///
/// The rectangle covers only the item's own footprint; any margin reserved
/// around it has already been subtracted.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<T> {
    pub(crate) item: T,
    pub(crate) rect: Rect,
}

impl<T> Placement<T> {
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.rect.pos()
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.rect.size()
    }

    #[inline]
    pub fn into_inner(self) -> (T, Rect) {
        (self.item, self.rect)
    }
}

/// Returned when an item could not be placed anywhere in the canvas.
///
/// This covers both items that are larger than the canvas itself and items
/// that only failed because earlier, larger items used up the space. The item
/// is handed back so that callers can report it.
#[derive(Debug, thiserror::Error)]
#[error("item of size {width}x{height} does not fit in the canvas")]
pub struct PackOverflow<T> {
    item: T,
    width: f64,
    height: f64,
}

impl<T: Sizable> PackOverflow<T> {
    pub(crate) fn new(item: T) -> Self {
        let width = item.width();
        let height = item.height();

        Self {
            item,
            width,
            height,
        }
    }
}

impl<T> PackOverflow<T> {
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    #[inline]
    pub fn into_item(self) -> T {
        self.item
    }
}
