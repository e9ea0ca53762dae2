//! ASCII rendering of the camera viewport.
use game_core::{CooldownAttacker, Damageable, Marker, Position, SkillId};
use strum::IntoEnumIterator;
use runtime::{DrawKind, GameMode, Session};

/// Glyph drawn for one draw request.
fn glyph(kind: DrawKind) -> char {
    match kind {
        DrawKind::Warrior => '@',
        DrawKind::Monster(_) => 'M',
        DrawKind::Chest => '$',
        DrawKind::GroundItem => '*',
        DrawKind::Portal { returning: false } => 'O',
        DrawKind::Portal { returning: true } => '0',
    }
}

/// Spawn markers only matter at load time and render as plain floor.
fn terrain(session: &Session, position: Position) -> char {
    match session.dungeon().current_map().tile(position) {
        Some(tile) => match tile.marker {
            Some(Marker::MonsterSpawn(_) | Marker::ChestSpawn | Marker::SpawnPoint) => '.',
            _ => tile.glyph,
        },
        None => ' ',
    }
}

pub fn frame(session: &Session) -> String {
    let camera = session.camera();
    let offset = camera.offset();
    let viewport = camera.viewport();

    let mut rows: Vec<Vec<char>> = (0..viewport.height as i32)
        .map(|y| {
            (0..viewport.width as i32)
                .map(|x| terrain(session, Position::new(offset.x + x, offset.y + y)))
                .collect()
        })
        .collect();

    // Later requests draw over earlier ones; the warrior comes last.
    for request in session.draw_requests() {
        let x = (request.grid.x - offset.x) as usize;
        let y = (request.grid.y - offset.y) as usize;
        if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = glyph(request.kind);
        }
    }

    let mut out = String::new();
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

pub fn status_line(session: &Session) -> String {
    let warrior = session.warrior();
    let experience = warrior.experience();
    let mut line = format!(
        "[{}] {} | HP {} | ATK {} | Lv {} ({} XP) | {} gold | portals {}",
        session.mode(),
        session.dungeon().current_map().name(),
        warrior.health(),
        warrior.attack_power(),
        experience.level(),
        experience.xp(),
        warrior.gold,
        warrior.count_town_portals(),
    );

    match session.mode() {
        GameMode::Inventory => {
            for (index, slot) in warrior.inventory().backpack().iter().enumerate() {
                if let Some(item) = slot.item() {
                    line.push_str(&format!("\n  {}: {}", index, item.name));
                }
            }
        }
        GameMode::Shop => {
            for (index, entry) in session.shop().stock().iter().enumerate() {
                let stock = if entry.infinite {
                    "inf".to_string()
                } else {
                    entry.quantity.to_string()
                };
                line.push_str(&format!(
                    "\n  {}: {} ({} gold, {})",
                    index,
                    entry.item.name,
                    entry.price(),
                    stock
                ));
            }
        }
        GameMode::Skills => {
            line.push_str(&format!("\n  skill points: {}", experience.skill_points()));
            let skills = warrior.skills();
            for skill in SkillId::iter() {
                let status = if skills.active() == Some(skill) {
                    "active"
                } else if skills.knows(skill) {
                    "learned"
                } else if experience.level() < skill.required_level() {
                    "locked"
                } else {
                    "available"
                };
                line.push_str(&format!(
                    "\n  T{} {} [{}, {}] {}",
                    skill.tier(),
                    skill,
                    skill.kind(),
                    status,
                    skill.description()
                ));
            }
        }
        _ => {}
    }

    if let Some(message) = session.state().message() {
        line.push_str(&format!("\n{}", message));
    }
    line
}
