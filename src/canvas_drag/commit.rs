use egui::Pos2;

/// An item as the backing collection sees it: a name and a container-relative position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasItem {
    pub name: String,
    pub left: f32,
    pub top: f32,
}

impl CanvasItem {
    pub fn new(name: impl Into<String>, left: f32, top: f32) -> Self {
        Self {
            name: name.into(),
            left,
            top,
        }
    }

    pub fn position(&self) -> Pos2 {
        Pos2::new(self.left, self.top)
    }
}

/// Where finished drags are written to.
///
/// Reflecting the new position on screen is up to whoever owns the store.
pub trait ItemStore<N> {
    fn set_position(&mut self, item: N, position: Pos2);
}

/// Writes the final position of a completed drag. Never called for cancelled sessions.
pub fn commit_position<N, S>(store: &mut S, item: N, position: Pos2)
where
    N: Copy + std::fmt::Debug,
    S: ItemStore<N> + ?Sized,
{
    log::debug!(
        "commit item={item:?} left={:.1} top={:.1}",
        position.x,
        position.y
    );
    store.set_position(item, position);
}
