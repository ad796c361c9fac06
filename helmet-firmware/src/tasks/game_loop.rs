// Game Loop Task - treibt den Scheduler aus helmet-core an
use defmt::info;
use embassy_time::{Duration, Timer};
use helmet_core::{Board, HelmetGame};

use crate::config::GAME_TICK_INTERVAL_MS;
use crate::hal::HelmetBoard;

/// Game Loop Logic - Testbare Hauptschleife ohne Hardware-Abhängigkeit
///
/// Ein Tick arbeitet Kommandos, Melodie, LEDs und Sensoren in fester
/// Reihenfolge ab (siehe `HelmetGame::tick`). Danach gibt die Schleife
/// die CPU kurz an WiFi und HTTP ab.
///
/// # Trait-basierte Abstraktion
/// Der generische Parameter `B: Board` ermöglicht:
/// - Real Hardware (HelmetBoard) im Production-Code
/// - jedes andere Board, z.B. ein Aufbau ohne Mikrofon
pub async fn game_loop_logic<B: Board>(mut board: B) -> ! {
    let mut game = HelmetGame::new();
    game.power_on(&mut board);
    info!("Game: loop started, tick every {} ms", GAME_TICK_INTERVAL_MS);

    loop {
        game.tick(&mut board);

        // Async Delay: gibt CPU an andere Tasks zurück
        Timer::after(Duration::from_millis(GAME_TICK_INTERVAL_MS)).await;
    }
}

/// Game Loop Task - Embassy Task für parallele Ausführung
///
/// Die Hardware wird in main.rs initialisiert und als fertiges
/// `HelmetBoard` übergeben.
#[embassy_executor::task]
pub async fn game_loop_task(board: HelmetBoard) {
    game_loop_logic(board).await
}
