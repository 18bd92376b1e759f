use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::dataset;
use crate::headshots;
use crate::roster;
use crate::state::{Delta, ProviderCommand};

/// Dataset provider. Kicks off one load cycle immediately, then waits for
/// reload commands from the UI thread.
pub fn spawn_csv_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        load_all(&tx);
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Reload => load_all(&tx),
            }
        }
    });
}

/// The two datasets load on independent threads with no ordering between
/// them; whichever finishes first fills its slot and the join recomputes
/// from what is available. A failed load only logs, leaving the slot as-is.
fn load_all(tx: &Sender<Delta>) {
    let tx_players = tx.clone();
    thread::spawn(move || {
        let path = dataset::predictions_path();
        match dataset::load_rows(&path) {
            Ok(rows) => {
                let records = roster::normalize(&rows);
                let _ = tx_players.send(Delta::Log(format!(
                    "[INFO] Loaded {} players from {}",
                    records.len(),
                    path.display()
                )));
                let _ = tx_players.send(Delta::SetPlayers(records));
            }
            Err(err) => {
                let _ = tx_players.send(Delta::Log(format!(
                    "[WARN] Player dataset load failed: {err:#}"
                )));
            }
        }
    });

    let tx_heads = tx.clone();
    thread::spawn(move || {
        let path = dataset::headshots_path();
        match dataset::load_rows(&path) {
            Ok(rows) => {
                let map = headshots::build_headshot_map(&rows);
                let _ = tx_heads.send(Delta::Log(format!(
                    "[INFO] Loaded {} headshots from {}",
                    map.len(),
                    path.display()
                )));
                let _ = tx_heads.send(Delta::SetHeadshots(map));
            }
            Err(err) => {
                let _ = tx_heads.send(Delta::Log(format!(
                    "[WARN] Headshot dataset load failed: {err:#}"
                )));
            }
        }
    });
}
