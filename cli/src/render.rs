//! Plain-text rendering of `GameView`

use std::fmt::Write;

use battler_core::state::{NoticeKind, Screen};
use battler_core::types::{Stat, StatBlock};
use battler_core::view::*;

const BAR_WIDTH: usize = 20;
/// Battle log lines shown under the HP bars
const LOG_TAIL: usize = 6;

pub fn render(view: &GameView) -> String {
    let mut out = String::new();
    match view.screen {
        Screen::Setup => {
            if let Some(setup) = &view.setup {
                render_setup(&mut out, setup);
            }
        }
        Screen::Battle => match &view.battle {
            Some(battle) => render_battle(&mut out, battle),
            None => out.push_str("Waiting for the next match...\n"),
        },
        Screen::LevelUp => {
            if let Some(level_up) = &view.level_up {
                render_level_up(&mut out, level_up);
            }
        }
        Screen::Victory => {
            if let Some(victory) = &view.victory {
                render_victory(&mut out, victory);
            }
        }
    }
    if let Some(notice) = &view.notice {
        let label = match notice.kind {
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        };
        let _ = writeln!(out, "[{}] {}", label, notice.message);
    }
    if view.busy {
        out.push_str("... waiting for server\n");
    }
    out
}

fn render_setup(out: &mut String, setup: &SetupView) {
    out.push_str("=== CREATE YOUR CREATURE ===\n");
    if setup.creature_types.is_empty() {
        out.push_str("(no creature types loaded)\n");
    }
    for info in &setup.creature_types {
        let marker = if setup.selected_type.as_ref() == Some(&info.creature_type) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{} {:<10} {}  [{}]",
            marker,
            info.creature_type,
            info.description,
            stat_line(&info.stat_biases, true)
        );
    }
    let name = if setup.name.trim().is_empty() {
        "(unnamed)"
    } else {
        setup.name.trim()
    };
    let _ = writeln!(out, "Name: {}", name);
    let _ = writeln!(
        out,
        "Bonus: {}  ({} left)",
        stat_line(&setup.allocation, false),
        setup.points_remaining
    );
    if setup.can_start {
        out.push_str("Ready: type 'start'\n");
    }
}

fn render_battle(out: &mut String, battle: &BattleView) {
    let _ = writeln!(out, "=== ROUND {} ===", battle.round);
    creature_line(out, "You", &battle.player);
    creature_line(out, "Foe", &battle.opponent);

    let skip = battle.log.len().saturating_sub(LOG_TAIL);
    for line in battle.log.iter().skip(skip) {
        let _ = writeln!(out, "  {}", line);
    }

    if let Some(winner) = battle.winner_name.as_ref().filter(|_| battle.match_complete) {
        let _ = writeln!(out, "{} wins the match!", winner);
    }
    if battle.show_next_match {
        out.push_str("Type 'next' for the next match\n");
    } else if battle.moves_enabled {
        let _ = writeln!(out, "Moves: {}", battle.moves.join(" | "));
    }
}

fn creature_line(out: &mut String, label: &str, creature: &CreatureDisplay) {
    let filled = (creature.hp_percent as usize * BAR_WIDTH) / 100;
    let fill = match creature.hp_band {
        HpBand::Healthy => '#',
        HpBand::Low => '=',
        HpBand::Critical => '!',
    };
    let _ = writeln!(
        out,
        "{:<4}{} ({}) [{}{}] {}/{}",
        label,
        creature.name,
        creature.creature_type,
        fill.to_string().repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        creature.hp,
        creature.max_hp
    );
}

fn render_level_up(out: &mut String, level_up: &LevelUpView) {
    out.push_str("=== LEVEL UP ===\n");
    for stat in Stat::ALL {
        let _ = writeln!(
            out,
            "  {:<9} {:>3} -> {:>3}",
            stat.as_str(),
            level_up.baseline.get(stat),
            level_up.preview.get(stat)
        );
    }
    let _ = writeln!(out, "Points left: {}", level_up.points_remaining);
    if level_up.can_confirm {
        out.push_str("Type 'confirm' to continue\n");
    }
}

fn render_victory(out: &mut String, victory: &VictoryView) {
    out.push_str("=== TOURNAMENT COMPLETE ===\n");
    match (&victory.champion_name, victory.player_is_champion) {
        (Some(_), true) => out.push_str("You are the champion!\n"),
        (Some(name), false) => {
            let _ = writeln!(out, "Champion: {}", name);
        }
        (None, _) => out.push_str("The tournament is over.\n"),
    }
    out.push_str("Type 'new' to play again\n");
}

fn stat_line(stats: &StatBlock, signed: bool) -> String {
    stats
        .iter()
        .map(|(stat, value)| {
            if signed {
                format!("{} {:+}", stat.as_str(), value)
            } else {
                format!("{} {}", stat.as_str(), value)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
