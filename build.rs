use csv::StringRecord;
use std::{
    fmt::Display,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

// Full span covered by lunar.csv. Narrower spans can be requested with the
// HOLIDAY_RULES_LUNAR_MIN_YEAR / HOLIDAY_RULES_LUNAR_MAX_YEAR env variables.
const DEFAULT_MIN_YEAR: i32 = 1900;
const DEFAULT_MAX_YEAR: i32 = 2100;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Date {
    year: i32,
    month: u8,
    day: u8,
    day_index: i32,
}

pub const fn ymd_as_days(y: i32, m: i32, d: i32) -> i32 {
    // Source: https://howardhinnant.github.io/date_algorithms.html
    let adjusted_year = y - if m <= 2 { 1 } else { 0 };

    let era = if adjusted_year >= 0 {
        adjusted_year / 400
    } else {
        (adjusted_year - 399) / 400
    };

    let year_of_era = adjusted_year - era * 400;
    let month_part = if m > 2 { m - 3 } else { m + 9 };
    let day_of_year = (153 * month_part + 2) / 5 + d - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

    era * 146097 + day_of_era - 719468
}

impl FromStr for Date {
    type Err = ();

    fn from_str(date: &str) -> Result<Self, Self::Err> {
        let mut date = date.split('-');
        let year = date.next().ok_or(())?.parse().map_err(|_| ())?;
        let month = date.next().ok_or(())?.parse().map_err(|_| ())?;
        let day = date.next().ok_or(())?.parse().map_err(|_| ())?;
        Ok(Date {
            year,
            month,
            day,
            day_index: ymd_as_days(year, month as i32, day as i32),
        })
    }
}

struct LunarYear {
    year: i32,
    info: u32,
    new_year: Date,
}

impl LunarYear {
    fn leap_month_days(&self) -> i32 {
        match (self.info & 0xf, self.info & 0x10000) {
            (0, _) => 0,
            (_, 0) => 29,
            _ => 30,
        }
    }

    fn days(&self) -> i32 {
        let big_months = (1..=12)
            .filter(|month| self.info & (0x10000 >> month) != 0)
            .count() as i32;
        348 + big_months + self.leap_month_days()
    }
}

fn parse_lunar_row(row: StringRecord) -> LunarYear {
    let mut it = row.iter();

    let year = it
        .next()
        .expect("invalid row in lunar.csv")
        .parse()
        .expect("invalid year in lunar.csv");
    let info = it.next().expect("invalid row in lunar.csv");
    let info = u32::from_str_radix(info.trim_start_matches("0x"), 16)
        .expect("invalid month bits in lunar.csv");
    let new_year = it
        .next()
        .expect("invalid row in lunar.csv")
        .parse()
        .expect("invalid date format in lunar.csv");

    LunarYear {
        year,
        info,
        new_year,
    }
}

/// Walks whole lunar years from the first listed new year and checks that
/// every listed new year agrees with the accumulated month lengths.
fn check_lunar_table(years: &[LunarYear]) {
    let mut expected = years[0].new_year.day_index;
    for (prev, next) in years.iter().zip(years.iter().skip(1)) {
        assert_eq!(next.year, prev.year + 1, "lunar.csv: years must be consecutive");
        expected += prev.days();
        assert_eq!(
            next.new_year.day_index, expected,
            "lunar.csv: new year of {} disagrees with month lengths of {}",
            next.year, prev.year
        );
    }
}

fn gen_lunar_tables<W: Write>(out: &mut W, years: &[LunarYear]) -> std::io::Result<()> {
    let first = years.first().expect("empty lunar table");
    let last = years.last().expect("empty lunar table");

    writeln!(out, "pub(crate) const DATA_MIN_YEAR: i32 = {};", first.year)?;
    writeln!(out, "pub(crate) const DATA_MAX_YEAR: i32 = {};", last.year)?;

    out.write_all(b"pub(crate) static LUNAR_INFO: &[u32] = &[")?;
    for y in years {
        write!(out, "{:#07x},", y.info)?;
    }
    out.write_all(b"];\n")?;

    // One entry per year plus the day after the last covered lunar year.
    out.write_all(b"pub(crate) static NEW_YEAR_JUMP_TABLE: &[Date] = &[")?;
    for y in years {
        write!(out, "Date({}),", y.new_year.day_index)?;
    }
    writeln!(out, "Date({})];", last.new_year.day_index + last.days())?;

    Ok(())
}

enum RuleSpec {
    Day { month: u8, day: u8 },
    Easter { days: i16, julian: bool },
    Lunar { month: u8, day: u8, shift: i8 },
    Equinox(String),
}

fn parse_month_day(s: &str) -> Result<(u8, u8), String> {
    let (month, day) = s.split_once('-').ok_or(format!("expected M-D, got {s}"))?;
    Ok((
        month.parse().map_err(|_| format!("bad month {month}"))?,
        day.parse().map_err(|_| format!("bad day {day}"))?,
    ))
}

impl FromStr for RuleSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let shape = parts.next().ok_or("empty rule")?;
        let arg = parts.next().ok_or(format!("missing argument in {s}"))?;
        Ok(match shape {
            "day" => {
                let (month, day) = parse_month_day(arg)?;
                RuleSpec::Day { month, day }
            }
            "easter" | "julian-easter" => RuleSpec::Easter {
                days: arg.parse().map_err(|_| format!("bad offset {arg}"))?,
                julian: shape == "julian-easter",
            },
            "lunar" => {
                let (month, day) = parse_month_day(arg)?;
                let shift = match parts.next() {
                    Some(it) => it.parse().map_err(|_| format!("bad shift {it}"))?,
                    None => 0,
                };
                RuleSpec::Lunar { month, day, shift }
            }
            "equinox" => match arg {
                "vernal" => RuleSpec::Equinox("Vernal".into()),
                "autumnal" => RuleSpec::Equinox("Autumnal".into()),
                _ => return Err(format!("unknown equinox {arg}")),
            },
            _ => return Err(format!("unknown rule shape {shape}")),
        })
    }
}

impl Display for RuleSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleSpec::Day { month, day } => {
                write!(f, "Rule::DayOfMonth {{ month: {month}, day: {day} }}")
            }
            RuleSpec::Easter { days, julian } => write!(
                f,
                "Rule::EasterOffset {{ days: {days}, computus: Computus::{} }}",
                if *julian { "Julian" } else { "Gregorian" }
            ),
            RuleSpec::Lunar { month, day, shift } => write!(
                f,
                "Rule::LunarDayOfMonth {{ month: {month}, day: {day}, shift: {shift} }}"
            ),
            RuleSpec::Equinox(which) => write!(f, "Rule::Equinox(Equinox::{which})"),
        }
    }
}

struct Template {
    ident: String,
    code: String,
    name: String,
    kind: &'static str,
    rule: RuleSpec,
}

fn parse_template_row(row: StringRecord) -> Template {
    let mut it = row.iter().map(String::from);

    let code = it.next().expect("invalid row in templates.csv");
    let name = it.next().expect("invalid row in templates.csv");
    let kind = match it.next().expect("invalid row in templates.csv").as_str() {
        "public" => "Public",
        "bank" => "Bank",
        "religious" => "Religious",
        "other" => "Other",
        other => panic!("unknown observance type {other} in templates.csv"),
    };
    let rule = it.next().expect("invalid row in templates.csv");
    let rule = rule
        .parse()
        .unwrap_or_else(|err| panic!("invalid rule for {code} in templates.csv: {err}"));

    Template {
        ident: code.to_uppercase().replace('-', "_"),
        code,
        name,
        kind,
        rule,
    }
}

fn gen_template_decl<'a, W: Write, T: Iterator<Item = &'a Template>>(
    out: &mut W,
    templates: T,
) -> std::io::Result<()> {
    let mut lookup = phf_codegen::Map::<&str>::new();

    out.write_all(b"declare_templates![\n")?;
    for t in templates {
        writeln!(
            out,
            "{}: {:?} {:?} {} ({}),",
            t.ident, t.code, t.name, t.kind, t.rule
        )?;
        lookup.entry(&t.code, format!("&{}", t.ident));
    }
    out.write_all(b"];\n")?;

    write!(
        out,
        "pub(crate) static CODE_TO_TEMPLATE: phf::Map<&'static str, &'static Holiday> = {}",
        lookup.build()
    )?;
    writeln!(out, ";")?;

    Ok(())
}

fn open_csv(path: &Path) -> csv::Reader<BufReader<File>> {
    println!("cargo:rerun-if-changed={}", path.display());
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(match File::open(path) {
            Ok(it) => it,
            Err(_) => {
                panic!("missing {}", path.display())
            }
        }))
}

fn env_year(name: &str, default: i32) -> i32 {
    println!("cargo:rerun-if-env-changed={name}");
    std::env::var(name)
        .map(|it| it.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn main() {
    let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(&std::env::var("OUT_DIR").unwrap());

    let years: Vec<LunarYear> = open_csv(&root.join("lunar.csv"))
        .records()
        .filter_map(Result::ok)
        .map(parse_lunar_row)
        .collect();
    assert!(!years.is_empty(), "lunar.csv has no rows");
    check_lunar_table(&years);

    let min_req_year = env_year("HOLIDAY_RULES_LUNAR_MIN_YEAR", DEFAULT_MIN_YEAR);
    let max_req_year = env_year("HOLIDAY_RULES_LUNAR_MAX_YEAR", DEFAULT_MAX_YEAR);
    let years: Vec<LunarYear> = years
        .into_iter()
        .skip_while(|it| it.year < min_req_year)
        .take_while(|it| it.year <= max_req_year)
        .collect();
    assert!(
        !years.is_empty(),
        "no lunar years left in {min_req_year}..={max_req_year}"
    );

    let lunar_out = out_dir.join("lunar_data.rs");
    let mut lunar_out =
        BufWriter::new(File::create(lunar_out).expect("unable to create lunar_data.rs"));
    gen_lunar_tables(&mut lunar_out, &years).unwrap();

    let templates: Vec<Template> = open_csv(&root.join("templates.csv"))
        .records()
        .filter_map(Result::ok)
        .map(parse_template_row)
        .collect();

    let templates_out = out_dir.join("templates.rs");
    let mut templates_out =
        BufWriter::new(File::create(templates_out).expect("unable to create templates.rs"));
    gen_template_decl(&mut templates_out, templates.iter()).unwrap();
}
