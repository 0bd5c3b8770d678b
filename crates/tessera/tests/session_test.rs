//! # Session Tests
//!
//! Generated world handed from the worker to a session, then edited.

use tessera::render::{ChunkCoord, CountingSink, FullBright, Rect, Transform2D};
use tessera::world::{
    compute_frame, GenerationWorker, PortalKind, TileType, WorldGenerator, WorldSeed,
    WorldSettings,
};
use tessera::{EditError, TileEvent, WorldSession};

fn session(seed: u64) -> WorldSession {
    let worker = GenerationWorker::spawn(
        WorldGenerator::new(),
        WorldSeed::new(seed),
        WorldSettings::from_tiers(0, 1, 1),
    )
    .expect("spawn worker");
    WorldSession::new(worker.wait().expect("world generation"))
}

/// Test: Mining the tile above a surface leaves every touched frame
/// consistent and the owning chunk clean after a rebuild.
#[test]
fn test_mining_keeps_frames_consistent() {
    let mut session = session(77);
    session.rebuild_all(&FullBright);
    let events = session.subscribe(64);

    let (x, y) = (300..500)
        .map(|x| (x, session.grid().surface_height(x)))
        .find(|&(x, y)| {
            let kind = session.grid().kind(x, y);
            !kind.is_air() && kind != TileType::Grass
        })
        .expect("a plain solid surface tile");

    let mined = session.mine(x, y).expect("mine");
    println!("Mined {mined:?} at ({x}, {y})");

    for dy in -1..=1 {
        for dx in -1..=1 {
            let tile = session.grid().get(x + dx, y + dy);
            if tile.is_air() || tile.kind() == TileType::Grass {
                continue;
            }
            assert_eq!(
                tile.frame(),
                compute_frame(session.grid(), x + dx, y + dy, tile.kind()),
                "stale frame at ({}, {})",
                x + dx,
                y + dy
            );
        }
    }

    let coord = ChunkCoord::of_tile(x, y);
    assert_eq!(session.chunks().is_dirty(coord), Some(true));
    session.rebuild_all(&FullBright);
    assert_eq!(session.chunks().is_dirty(coord), Some(false));

    let drained = events.drain();
    assert!(drained.contains(&TileEvent::TileMined { x, y, kind: mined }));
}

/// Test: Portal frames survive mining attempts.
#[test]
fn test_portals_are_unbreakable() {
    let mut session = session(78);
    let portal = *session.grid().portals().find(PortalKind::Desert).expect("desert portal");

    let result = session.mine(portal.x, portal.y);
    assert!(matches!(result, Err(EditError::Unbreakable { kind: TileType::PortalCore, .. })));
    assert_eq!(session.grid().kind(portal.x, portal.y), TileType::PortalCore);
}

/// Test: Placing then mining the same tile round-trips the geometry count.
#[test]
fn test_place_then_mine_restores_quads() {
    let mut session = session(79);
    session.rebuild_all(&FullBright);
    let view = Rect::new(0, 0, 800 * 16, 400 * 16);
    let mut sink = CountingSink::default();
    let before = session.render(&view, &Transform2D::IDENTITY, &FullBright, &mut sink).quads;

    let (x, y) = (10, 2);
    assert!(session.grid().get(x, y).is_air());
    session.place(x, y, TileType::Stone).expect("place");
    session.rebuild_all(&FullBright);
    let placed = session.render(&view, &Transform2D::IDENTITY, &FullBright, &mut sink).quads;
    assert_eq!(placed, before + 1);

    session.mine(x, y).expect("mine");
    session.rebuild_all(&FullBright);
    let after = session.render(&view, &Transform2D::IDENTITY, &FullBright, &mut sink).quads;
    assert_eq!(after, before);
}
