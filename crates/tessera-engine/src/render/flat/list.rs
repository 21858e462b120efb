use super::FlatCmd;

/// Paint layer of a flat command. Larger values paint over smaller ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

/// A recorded command with its layer and its position in the recording.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub z: ZIndex,
    pub order: u32,
    pub cmd: FlatCmd,
}

impl DrawItem {
    /// Paint order: layer first, then recording order.
    fn paint_key(&self) -> (ZIndex, u32) {
        (self.z, self.order)
    }
}

/// Recorded flat draw stream for a frame.
///
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: FlatCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem { z, order, cmd });
        self.sorted_dirty = true;
    }

    /// Iterates items back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        let items = &self.items;
        self.sorted_indices.sort_unstable_by_key(|&i| items[i].paint_key());

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::render::flat::FlatPrimitive;
    use glam::Vec2;

    fn tagged(size: f32) -> FlatCmd {
        FlatCmd::points(&[Vec2::ZERO], size, Color::WHITE)
    }

    fn sizes(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match item.cmd.primitive {
                FlatPrimitive::Points { size } => size,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut list = DrawList::new();
        list.push(ZIndex(1), tagged(1.0));
        list.push(ZIndex(0), tagged(2.0));
        list.push(ZIndex(1), tagged(3.0));
        list.push(ZIndex(-5), tagged(4.0));
        list.push(ZIndex(0), tagged(5.0));

        assert_eq!(sizes(&mut list), vec![4.0, 2.0, 5.0, 1.0, 3.0]);
    }

    #[test]
    fn push_after_iteration_resorts() {
        let mut list = DrawList::new();
        list.push(ZIndex(2), tagged(1.0));
        assert_eq!(sizes(&mut list), vec![1.0]);

        list.push(ZIndex(0), tagged(2.0));
        assert_eq!(sizes(&mut list), vec![2.0, 1.0]);
    }

    #[test]
    fn clear_resets_order_counter() {
        let mut list = DrawList::new();
        list.push(ZIndex(0), tagged(1.0));
        list.clear();
        assert!(list.is_empty());

        list.push(ZIndex(0), tagged(2.0));
        assert_eq!(list.items()[0].order, 0);
    }
}
