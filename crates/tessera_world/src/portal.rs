//! # Portal Registry
//!
//! Fixed-kind, one-per-world portal markers.
//!
//! Each world owns its own registry, so portals from a previous session can
//! never leak into the next one. Portals are addressed by a small index
//! handle; registering a kind that already exists only moves it.

/// The fixed portal kinds. The discriminant is the portal's stable id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PortalKind {
    /// Surface cave entrance.
    Cave = 1,
    /// Floating island.
    Island = 2,
    /// Desert mountain apex.
    Desert = 3,
}

impl PortalKind {
    /// All kinds, in id order.
    pub const ALL: [Self; 3] = [Self::Cave, Self::Island, Self::Desert];

    /// Stable numeric id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cave => "Cave Portal",
            Self::Island => "Sky Island Portal",
            Self::Desert => "Desert Portal",
        }
    }
}

/// Handle to a portal in a [`PortalRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortalHandle {
    /// Index into the registry.
    index: u32,
}

/// A placed portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Portal {
    /// Which portal this is.
    pub kind: PortalKind,
    /// Tile column of the portal's marker tile.
    pub x: i32,
    /// Tile row of the portal's marker tile.
    pub y: i32,
    /// Whether the portal can currently be used.
    pub active: bool,
}

/// Per-world portal storage.
#[derive(Clone, Debug, Default)]
pub struct PortalRegistry {
    portals: Vec<Portal>,
}

impl PortalRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { portals: Vec::with_capacity(PortalKind::ALL.len()) }
    }

    /// Places a portal, or moves it if one of that kind already exists.
    ///
    /// # Returns
    ///
    /// The handle of the (possibly pre-existing) portal.
    #[allow(clippy::cast_possible_truncation)]
    pub fn place(&mut self, kind: PortalKind, x: i32, y: i32) -> PortalHandle {
        if let Some(index) = self.portals.iter().position(|p| p.kind == kind) {
            let portal = &mut self.portals[index];
            portal.x = x;
            portal.y = y;
            return PortalHandle { index: index as u32 };
        }

        self.portals.push(Portal { kind, x, y, active: true });
        PortalHandle { index: (self.portals.len() - 1) as u32 }
    }

    /// Looks up a portal by handle.
    #[must_use]
    pub fn get(&self, handle: PortalHandle) -> Option<&Portal> {
        self.portals.get(handle.index as usize)
    }

    /// Mutable lookup by handle.
    pub fn get_mut(&mut self, handle: PortalHandle) -> Option<&mut Portal> {
        self.portals.get_mut(handle.index as usize)
    }

    /// Finds the handle of a portal kind.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn handle_of(&self, kind: PortalKind) -> Option<PortalHandle> {
        self.portals
            .iter()
            .position(|p| p.kind == kind)
            .map(|index| PortalHandle { index: index as u32 })
    }

    /// Finds a portal by kind.
    #[must_use]
    pub fn find(&self, kind: PortalKind) -> Option<&Portal> {
        self.portals.iter().find(|p| p.kind == kind)
    }

    /// Iterates over all portals in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Portal> {
        self.portals.iter()
    }

    /// Number of placed portals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.portals.len()
    }

    /// Returns true if no portal has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }
}
