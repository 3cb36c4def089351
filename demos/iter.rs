use chrono::NaiveDate;
use holiday_rules::templates;

fn main() -> anyhow::Result<()> {
    let year = std::env::args()
        .nth(1)
        .map(|it| it.parse())
        .transpose()?
        .unwrap_or(2024);

    for template in templates::iter() {
        match template.calc(year) {
            Ok(Some(it)) => {
                let date = NaiveDate::try_from(it.actual)?;
                println!("{date} {} ({:?})", template.name, template.kind);
            }
            Ok(None) => {}
            Err(err) => println!("{:<10} {}: {err}", "-", template.name),
        }
    }

    Ok(())
}
