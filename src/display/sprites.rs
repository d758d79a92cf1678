/// Built-in player glyphs.
///
/// Art is stored facing left; bird and fish are mirrored at draw time so
/// they face the direction of travel.  The rocket already faces right.

use crate::entities::Character;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    NoseUp,
    Level,
    NoseDown,
}

/// Tilt (radians) beyond which the sprite switches pose.
const POSE_THRESHOLD: f64 = 0.15;
/// Tilt per unit of vertical velocity.
const TILT_PER_VELOCITY: f64 = 0.05;

/// Pick a pose from vertical velocity: rising noses up, falling noses down.
pub fn pose_for(vy: f64) -> Pose {
    let tilt = vy * TILT_PER_VELOCITY;
    if tilt < -POSE_THRESHOLD {
        Pose::NoseUp
    } else if tilt > POSE_THRESHOLD {
        Pose::NoseDown
    } else {
        Pose::Level
    }
}

fn native(character: Character, pose: Pose) -> &'static str {
    match (character, pose) {
        (Character::Bird, Pose::NoseUp) => "<o\\",
        (Character::Bird, Pose::Level) => "<o-",
        (Character::Bird, Pose::NoseDown) => "<o/",
        (Character::Fish, Pose::NoseUp) => "<°)\\",
        (Character::Fish, Pose::Level) => "<°)=",
        (Character::Fish, Pose::NoseDown) => "<°)/",
        (Character::Rocket, Pose::NoseUp) => "=[/",
        (Character::Rocket, Pose::Level) => "=[>",
        (Character::Rocket, Pose::NoseDown) => "=[\\",
    }
}

pub fn is_mirrored(character: Character) -> bool {
    match character {
        Character::Bird | Character::Fish => true,
        Character::Rocket => false,
    }
}

/// Flip a glyph string left-to-right, swapping direction-bearing characters.
pub fn mirror(glyphs: &str) -> String {
    glyphs
        .chars()
        .rev()
        .map(|c| match c {
            '<' => '>',
            '>' => '<',
            '/' => '\\',
            '\\' => '/',
            '(' => ')',
            ')' => '(',
            '[' => ']',
            ']' => '[',
            '{' => '}',
            '}' => '{',
            other => other,
        })
        .collect()
}

/// The glyphs to draw for `character` at vertical velocity `vy`.
pub fn player_glyph(character: Character, vy: f64) -> String {
    let art = native(character, pose_for(vy));
    if is_mirrored(character) {
        mirror(art)
    } else {
        art.to_string()
    }
}
