//! Name generation for generated personnel

use floorwatch_logic::model::Role;
use rand::Rng;

/// Display name for a generated person. Visitors get a numbered badge
/// name instead of a given name.
pub fn generate_name(role: Role, rng: &mut impl Rng) -> String {
    match role {
        Role::Worker => format!("Tech_{}", pick_given(rng)),
        Role::Supervisor => format!("Sup_{}", pick_given(rng)),
        Role::Visitor => format!("Visitor_{:02}", rng.gen_range(1..100)),
    }
}

fn pick_given(rng: &mut impl Rng) -> &'static str {
    GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())]
}

static GIVEN_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "David", "Mary", "Linda", "Sarah",
    "Wei", "Yuki", "Aisha", "Pavel", "Ingrid", "Carlos", "Fatima", "Raj",
    "Olga", "Kwame", "Lucia", "Hiro", "Amara", "Tomas", "Mei", "Noor",
];
