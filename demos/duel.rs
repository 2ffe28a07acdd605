use clap::Parser;
use duel_sim::{
    SimError, SimulationConfig,
    model::{Character, Combatant, Perk, Skill, Weapon, WeaponType},
    simulate::{AggregationEngine, FightResult, MultiSimulationResult},
};
use log::info;

/// Runs a few showcase duels and prints their statistics
#[derive(Debug, Parser)]
struct Args {
    /// How many duels the batch runs should do
    #[arg(short, long, default_value_t = 100)]
    fights: u32,
    /// After how many turns a duel is called a draw
    #[arg(
        long,
        env = "DUEL_MAX_TURNS",
        default_value_t = SimulationConfig::DEFAULT_MAX_TURNS
    )]
    max_turns: u32,
    /// Log every single attack
    #[arg(short, long)]
    verbose: bool,
}

pub fn main() -> Result<(), SimError> {
    let args = Args::parse();
    env_logger::builder()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        })
        .init();

    let engine = AggregationEngine::new(
        SimulationConfig::new().with_max_turns(args.max_turns),
    )?;

    let bow = Weapon::new("Ebony Bow", 19.0, 1.0, WeaponType::Bow)?;
    let greatsword = Weapon::new(
        "Dragonbone Greatsword",
        25.0,
        0.7,
        WeaponType::TwoHandedGreatsword,
    )?;
    let mut archer =
        Character::new("Stealth Archer", 200.0, 250.0, 100.0, bow)?;
    archer.set_skill(Skill::Archery, 100);
    archer.set_skill(Skill::Sneak, 100);
    let mut warrior = Character::new(
        "Two-Handed Warrior",
        400.0,
        250.0,
        100.0,
        greatsword,
    )?;

    println!("=== SINGLE COMBAT ===");
    let fight = engine.duel_engine().resolve(&mut archer, &mut warrior)?;
    print_fight(&fight, &archer, &warrior);

    println!("\n=== {} FIGHTS ===", args.fights);
    let stats = engine.run_batch(&mut archer, &mut warrior, args.fights)?;
    print_batch(&stats);

    println!("\n=== PERKED ARCHER, {} FIGHTS ===", args.fights);
    archer.add_perk(Perk::Overdraw5);
    archer.add_perk(Perk::CriticalShot);
    info!(
        "Perk multiplier of {}: {}x",
        archer.name(),
        archer.perk_damage_multiplier()
    );
    let stats = engine.run_batch(&mut archer, &mut warrior, args.fights)?;
    print_batch(&stats);

    println!("\n=== DRAW SCENARIO ===");
    let stick =
        Weapon::new("Wooden Stick", 0.0, 1.0, WeaponType::OneHandedSword)?;
    let dagger =
        Weapon::new("Broken Dagger", 0.0, 1.0, WeaponType::OneHandedDagger)?;
    let mut pacifist =
        Character::new("Pacifist", 100.0, 100.0, 100.0, stick)?;
    let mut other =
        Character::new("Also Pacifist", 100.0, 100.0, 100.0, dagger)?;
    let stats = engine.run_batch(&mut pacifist, &mut other, 10)?;
    print_batch(&stats);

    println!("\n=== DAMAGE BOOSTING PERKS ===");
    for perk in Perk::damage_boosting() {
        println!(
            "{} (+{:.0}% damage)",
            perk.display_name(),
            perk.damage_increase_percent()
        );
    }
    Ok(())
}

fn print_fight(fight: &FightResult, a: &Character, b: &Character) {
    for fighter in [a, b] {
        println!("{}", fighter.name());
        println!(
            "  Weapon: {} ({} damage, {:.1} dps)",
            fighter.weapon().name(),
            fighter.weapon().base_damage(),
            fighter.weapon().dps()
        );
        println!(
            "  Health: {}/{}",
            fighter.health(),
            fighter.max_health()
        );
        println!(
            "  Total damage dealt: {:.1}",
            fight.total_damage_by(fighter.name())
        );
        println!(
            "  Average damage per hit: {:.1}",
            fight.average_damage_by(fighter.name())
        );
    }
    println!("Winner: {}", fight.winner_name());
    println!("Duration: {} turns", fight.total_turns());
    println!("Attacks: {}", fight.events().len());
    for event in fight.events().iter().take(5) {
        println!(
            "  {} attacks {} with {} for {:.1} damage",
            event.attacker_name(),
            event.defender_name(),
            event.weapon_used(),
            event.damage_dealt()
        );
    }
}

fn print_batch(stats: &MultiSimulationResult) {
    println!(
        "{}: {} wins ({:.1}%)",
        stats.fighter1_name(),
        stats.fighter1_wins(),
        stats.fighter1_win_rate()
    );
    println!(
        "{}: {} wins ({:.1}%)",
        stats.fighter2_name(),
        stats.fighter2_wins(),
        stats.fighter2_win_rate()
    );
    println!("Draws: {} ({:.1}%)", stats.draws(), stats.draw_rate());
    println!("Overall winner: {}", stats.overall_winner());
    println!("Win margin: {} fights", stats.win_margin());
    println!(
        "Significant: {}",
        if stats.is_significant() { "YES" } else { "NO" }
    );
    println!(
        "Average duration: {:.1} turns",
        stats.average_fight_duration()
    );
    if let (Some(shortest), Some(longest)) = (
        stats.shortest_fight_duration(),
        stats.longest_fight_duration(),
    ) {
        println!("Shortest: {shortest} turns, longest: {longest} turns");
    }
}
