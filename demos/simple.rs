use chrono::NaiveDate;
use holiday_rules::{observed, templates, DateExt, Overrides};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let boxing_day = templates::CHRISTMAS_DAY_2.clone_with(
        Overrides::new()
            .name("Boxing Day")
            .observed(observed::WEEKEND_TO_MONDAY),
    );

    let d = NaiveDate::from_ymd_opt(2021, 12, 27).expect("Invalid date");
    println!(
        "Is {d} a day off for {}? Answer is {}",
        boxing_day.name,
        d.is_observance_of(&boxing_day)?
    );

    if let Some(it) = boxing_day.calc(2021)? {
        println!("{} 2021: {} (observed {})", boxing_day.name, it.actual, it.observed);
    }
    println!("In the lunar calendar {d} is {}", d.to_lunar()?);

    Ok(())
}
