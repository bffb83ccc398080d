//! Jelly Hoops entry point
//!
//! The browser build is driven from `platform::web`. Natively this runs a
//! headless demo: a scripted volley of shots, logging every event.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use jelly_hoops::consts::SIM_DT;
    use jelly_hoops::platform::MemoryStore;
    use jelly_hoops::sim::{Field, GameEvent};
    use jelly_hoops::{Session, SessionPhase, Tuning};

    env_logger::init();
    log::info!("Jelly Hoops (native) starting...");

    let tuning = match std::env::var("JELLY_HOOPS_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Bad tuning in {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let field = Field::new(400.0, 800.0);
    let mut session = Session::new(MemoryStore::new(), tuning, field, 2024);
    session.open();

    // Drag offsets (dx, dy) from a fixed anchor; pulling down fires upward
    let volley = [
        (0.0, 200.0),
        (-20.0, 210.0),
        (35.0, 190.0),
        (0.0, 60.0),
        (10.0, 230.0),
        (-45.0, 200.0),
        (0.0, 0.0),
        (20.0, 205.0),
    ];

    for round in 0..4 {
        for &(dx, dy) in &volley {
            if session.phase() != SessionPhase::Running {
                break;
            }
            if session.pointer_down(200.0, 300.0) {
                session.pointer_move(200.0 + dx / 2.0, 300.0 + dy / 2.0);
                session.pointer_up(200.0 + dx, 300.0 + dy);
            }
            // Let the shot play out for two seconds
            for _ in 0..120 {
                for event in session.frame(SIM_DT) {
                    match event {
                        GameEvent::Scored { points, .. } => log::info!("Round {}: +{} points", round, points),
                        GameEvent::Missed { .. } => log::info!("Round {}: miss", round),
                        GameEvent::StageReached { stage } => log::info!("Stage {:?}", stage),
                        GameEvent::GameOver { score } => log::info!("Game over at {}", score),
                        _ => {}
                    }
                }
            }
        }
    }

    match session.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
