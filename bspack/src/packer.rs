use crate::{
    geometry::{approx_eq, Rect},
    types::{PackOverflow, Placement, Sizable},
};

/// Packs every item into a single `width` by `height` canvas, leaving
/// `margin` units of space between neighboring items.
///
/// Shorthand for `BspPacker::new((width, height)).margin(margin).pack(items)`.
pub fn pack<T, I>(
    items: I,
    width: f64,
    height: f64,
    margin: f64,
) -> Result<Vec<Placement<T>>, PackOverflow<T>>
where
    T: Sizable,
    I: IntoIterator<Item = T>,
{
    BspPacker::new((width, height)).margin(margin).pack(items)
}

/// Packs items into one fixed-size canvas by recursively splitting free space
/// into a binary tree of regions.
#[derive(Debug, Clone, Copy)]
pub struct BspPacker {
    size: (f64, f64),
    margin: f64,
}

impl BspPacker {
    pub fn new(size: (f64, f64)) -> Self {
        Self { size, margin: 0.0 }
    }

    /// Space to reserve to the right of and above each placed item.
    pub fn margin(self, margin: f64) -> Self {
        Self { margin, ..self }
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    /// Places all items, largest area first.
    ///
    /// Placements are returned in the order of the tree that was built, which
    /// is generally not the order the items were given in. If any item doesn't
    /// fit, nothing is returned except that item.
    pub fn pack<T, I>(&self, items: I) -> Result<Vec<Placement<T>>, PackOverflow<T>>
    where
        T: Sizable,
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = items.into_iter().collect();

        // Vec::sort_by is stable, so items with the same area keep their
        // relative order.
        items.sort_by(|a, b| b.area().total_cmp(&a.area()));

        let num_items = items.len();
        log::trace!(
            "Packing {} items into {}x{} with margin {}",
            num_items,
            self.size.0,
            self.size.1,
            self.margin
        );

        let mut root = PackNode::new(
            Rect::new(0.0, 0.0, self.size.0, self.size.1),
            self.margin,
        );

        for item in items {
            if let Err(item) = root.insert(item) {
                log::trace!(
                    "Item of size {}x{} did not fit",
                    item.width(),
                    item.height()
                );

                return Err(PackOverflow::new(item));
            }
        }

        let mut placements = Vec::with_capacity(num_items);
        root.flatten(&mut placements);

        log::trace!("Finished packing {} items", placements.len());

        Ok(placements)
    }
}

#[derive(Debug)]
enum NodeState<T> {
    Free,
    Occupied(T),
    Split(Box<[PackNode<T>; 2]>),
}

/// A region of the canvas. Leaves are free or hold exactly one item; split
/// nodes own two children covering their area.
#[derive(Debug)]
struct PackNode<T> {
    rect: Rect,
    margin: f64,
    state: NodeState<T>,
}

impl<T: Sizable> PackNode<T> {
    fn new(rect: Rect, margin: f64) -> Self {
        Self {
            rect,
            margin,
            state: NodeState::Free,
        }
    }

    /// Tries to place `item` somewhere in this subtree, handing it back if
    /// there is no room.
    fn insert(&mut self, item: T) -> Result<(), T> {
        match self.state {
            NodeState::Split(ref mut children) => {
                let [a, b] = &mut **children;
                a.insert(item).or_else(|item| b.insert(item))
            }
            NodeState::Occupied(_) => Err(item),
            NodeState::Free => self.insert_free(item),
        }
    }

    fn insert_free(&mut self, item: T) -> Result<(), T> {
        let usable_width = self.rect.width - self.margin;
        let usable_height = self.rect.height - self.margin;

        let item_width = item.width();
        let item_height = item.height();

        // NaN never compares greater or equal, so it would split forever.
        if !item_width.is_finite() || !item_height.is_finite() {
            return Err(item);
        }

        if item_width > usable_width || item_height > usable_height {
            return Err(item);
        }

        if approx_eq(item_width, usable_width) && approx_eq(item_height, usable_height) {
            self.state = NodeState::Occupied(item);
            return Ok(());
        }

        let delta_width = usable_width - item_width;
        let delta_height = usable_height - item_height;
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;

        let (a, b) = if delta_width > delta_height {
            let a_width = item_width + self.margin;

            (
                Rect::new(x, y, a_width, height),
                Rect::new(x + a_width, y, delta_width, height),
            )
        } else {
            let a_height = item_height + self.margin;

            (
                Rect::new(x, y, width, a_height),
                Rect::new(x, y + a_height, width, delta_height),
            )
        };

        log::trace!("Split {:?} into {:?} and {:?}", self.rect, a, b);

        let mut children = Box::new([
            PackNode::new(a, self.margin),
            PackNode::new(b, self.margin),
        ]);

        // The first child is sized from the item, so this either fits exactly
        // or splits once more along the other axis.
        let result = children[0].insert(item);
        self.state = NodeState::Split(children);
        result
    }

    /// Collects occupied leaves in pre-order, `a` before `b`.
    fn flatten(self, output: &mut Vec<Placement<T>>) {
        match self.state {
            NodeState::Occupied(item) => output.push(Placement {
                item,
                rect: Rect::new(
                    self.rect.x,
                    self.rect.y,
                    self.rect.width - self.margin,
                    self.rect.height - self.margin,
                ),
            }),
            NodeState::Split(children) => {
                let [a, b] = *children;
                a.flatten(output);
                b.flatten(output);
            }
            NodeState::Free => {}
        }
    }

    #[cfg(test)]
    fn count(&self) -> usize {
        match &self.state {
            NodeState::Split(children) => 1 + children[0].count() + children[1].count(),
            _ => 1,
        }
    }
}
