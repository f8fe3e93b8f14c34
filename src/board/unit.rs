//! Unit kinds and the wire kind-index codec.
//!
//! The game config and the frame event log identify units by a small integer
//! index. Indices 0..=5 name the six real unit kinds; 6 and 7 are the
//! protocol's removal and upgrade markers and are not unit kinds.

/// A structure kind that occupies a cell for as long as it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationaryKind {
    Wall,
    Factory,
    Turret,
}

impl StationaryKind {
    /// Returns the wire kind index.
    pub const fn index(self) -> u8 {
        match self {
            StationaryKind::Wall => 0,
            StationaryKind::Factory => 1,
            StationaryKind::Turret => 2,
        }
    }

    /// Returns true for the kinds the repair pipeline reacts to.
    ///
    /// Factories are deliberately excluded: losing one is an economic hit,
    /// not a hole in the line, and the expansion stage refills the economy
    /// on its own schedule.
    pub const fn is_defender(self) -> bool {
        matches!(self, StationaryKind::Wall | StationaryKind::Turret)
    }
}

/// A mobile kind, deployed on a friendly edge and gone at end of turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobileKind {
    Scout,
    Demolisher,
    Interceptor,
}

impl MobileKind {
    /// Returns the wire kind index.
    pub const fn index(self) -> u8 {
        match self {
            MobileKind::Scout => 3,
            MobileKind::Demolisher => 4,
            MobileKind::Interceptor => 5,
        }
    }
}

/// Any placeable unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Stationary(StationaryKind),
    Mobile(MobileKind),
}

/// Number of real unit kinds carried by the config table.
pub const UNIT_KIND_COUNT: usize = 6;

impl UnitKind {
    pub const ALL: [UnitKind; UNIT_KIND_COUNT] = [
        UnitKind::Stationary(StationaryKind::Wall),
        UnitKind::Stationary(StationaryKind::Factory),
        UnitKind::Stationary(StationaryKind::Turret),
        UnitKind::Mobile(MobileKind::Scout),
        UnitKind::Mobile(MobileKind::Demolisher),
        UnitKind::Mobile(MobileKind::Interceptor),
    ];

    /// Resolves a wire kind index. Returns `None` for the removal and
    /// upgrade markers and for anything out of range.
    pub fn from_index(index: i64) -> Option<UnitKind> {
        match index {
            0 => Some(UnitKind::Stationary(StationaryKind::Wall)),
            1 => Some(UnitKind::Stationary(StationaryKind::Factory)),
            2 => Some(UnitKind::Stationary(StationaryKind::Turret)),
            3 => Some(UnitKind::Mobile(MobileKind::Scout)),
            4 => Some(UnitKind::Mobile(MobileKind::Demolisher)),
            5 => Some(UnitKind::Mobile(MobileKind::Interceptor)),
            _ => None,
        }
    }

    /// Returns the wire kind index.
    pub const fn index(self) -> u8 {
        match self {
            UnitKind::Stationary(k) => k.index(),
            UnitKind::Mobile(k) => k.index(),
        }
    }

    pub const fn is_stationary(self) -> bool {
        matches!(self, UnitKind::Stationary(_))
    }
}

impl From<StationaryKind> for UnitKind {
    fn from(kind: StationaryKind) -> Self {
        UnitKind::Stationary(kind)
    }
}

impl From<MobileKind> for UnitKind {
    fn from(kind: MobileKind) -> Self {
        UnitKind::Mobile(kind)
    }
}
