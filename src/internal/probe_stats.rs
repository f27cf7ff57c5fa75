#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(clippy::pedantic)]
#![allow(warnings)]

use plotters::prelude::*;
use rand::Rng;

// Probe-count simulation: how the crate's collision-resolution methods
// behave on a stream of random calendar-date keys as the load factor rises.
const TABLE_SIZE: usize = 16 * 366;
const NUM_LOAD_FACTORS: usize = 10;

const METHODS: [&str; 3] = ["Linear + Polynomial", "Linear + Date Hash", "Double Hashing"];
const MAX_PROBES: usize = 200; // Prevent runaway probe chains

const HASH_BASE: usize = 31;
const HASH_BASE2: usize = 37;
const HASH_SEED: usize = 31_415;
const HASH_SEED2: usize = 27_183;

const DAYS_BEFORE_MONTH: [usize; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const MONTH_LENGTHS: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

// A random `YYYY-MM-DD` key between 1970 and 2045; leap days are skipped so
// every generated date is calendar-valid.
fn random_date_key(rng: &mut impl Rng) -> String {
    let year = rng.random_range(1970..2046);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=MONTH_LENGTHS[month - 1]);
    format!("{year:04}-{month:02}-{day:02}")
}

// Same polynomial rolling hash the library uses for string keys.
fn polynomial_hash(key: &str, seed: usize, base: usize, reverse: bool) -> usize {
    let mut value = 0usize;
    let mut a = seed;
    let chars: Vec<char> = if reverse {
        key.chars().rev().collect()
    } else {
        key.chars().collect()
    };
    for ch in chars {
        value = (ch as usize + a * value) % TABLE_SIZE;
        a = a * base % (TABLE_SIZE - 1);
    }
    value
}

// Band-per-year date hash: (year mod c) picks a 366-slot band, the ordinal
// day picks the slot within it.
fn date_hash(key: &str) -> usize {
    let year: usize = key[0..4].parse().unwrap_or(1970);
    let month: usize = key[5..7].parse().unwrap_or(1);
    let day: usize = key[8..10].parse().unwrap_or(1);
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    let day_of_year =
        DAYS_BEFORE_MONTH[month - 1] + day + if leap && month > 2 { 1 } else { 0 };
    let bands = TABLE_SIZE / 366;
    let band = (year - 1970) % bands;
    (band * 366 + day_of_year - 1) % TABLE_SIZE
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

// Step size with the coprimality adjustment the lazy table applies.
fn step_hash(key: &str) -> usize {
    let value = polynomial_hash(key, HASH_SEED2, HASH_BASE2, true);
    let mut step = value % (TABLE_SIZE - 1) + 1;
    while gcd(step, TABLE_SIZE) != 1 {
        step = (step + 1) % (TABLE_SIZE - 1);
        if step == 0 {
            step = 1;
        }
    }
    step
}

// Insert with step = 1, counting probes until a free slot is claimed.
fn linear_probing(table: &mut Vec<Option<String>>, key: &str, use_date_hash: bool) -> usize {
    let mut index = if use_date_hash {
        date_hash(key)
    } else {
        polynomial_hash(key, HASH_SEED, HASH_BASE, false)
    };
    let mut probes = 1;

    while table[index].is_some() && probes < MAX_PROBES {
        index = (index + 1) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(key.to_string());
    }

    probes
}

// Insert with step = hash2(key), counting probes until a free slot is claimed.
fn double_hashing(table: &mut Vec<Option<String>>, key: &str) -> usize {
    let mut index = polynomial_hash(key, HASH_SEED, HASH_BASE, false);
    let step = step_hash(key);
    let mut probes = 1;

    while table[index].is_some() && probes < MAX_PROBES {
        index = (index + step) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(key.to_string());
    }

    probes
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load factors from 0.1 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut worst_case_probes: Vec<Vec<usize>> = vec![Vec::new(); METHODS.len()];

    // One shared key stream so every method sees the same dates.
    let mut rng = rand::rng();
    let max_keys_needed = *num_keys.iter().max().unwrap();
    let keys: Vec<String> = (0..max_keys_needed).map(|_| random_date_key(&mut rng)).collect();

    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (method_idx, &method) in METHODS.iter().enumerate() {
            let mut table: Vec<Option<String>> = vec![None; TABLE_SIZE];
            let mut probes_list: Vec<usize> = Vec::with_capacity(n_keys);

            for key in keys.iter().take(n_keys) {
                let probes = match method {
                    "Linear + Polynomial" => linear_probing(&mut table, key, false),
                    "Linear + Date Hash" => linear_probing(&mut table, key, true),
                    "Double Hashing" => double_hashing(&mut table, key),
                    _ => panic!("Unknown method"),
                };
                probes_list.push(probes);
            }

            let avg = probes_list.iter().sum::<usize>() as f64 / probes_list.len() as f64;
            let worst = *probes_list.iter().max().unwrap_or(&0);

            average_probes[method_idx].push(avg);
            worst_case_probes[method_idx].push(worst);

            println!("  {}: Avg probes = {:.2}, Worst = {}", method, avg, worst);
        }
    }

    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Plot 1: average probes per insert
    let root = BitMapBackend::new("average_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Probes per Insert (date-key stream)", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_avg)?;

    let x_labels: Vec<String> = num_keys.iter().map(|&n| n.to_string()).collect();

    chart
        .configure_mesh()
        .x_labels(num_keys.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Average Probes per Insert")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Reference line at the two-thirds load factor where the library rehashes
    let rehash_idx = num_keys.len() * 2 / 3;
    if rehash_idx < num_keys.len() - 1 {
        let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
        chart
            .draw_series(LineSeries::new(
                vec![(rehash_idx, 0.0), (rehash_idx, max_avg)],
                reference_style,
            ))?
            .label("~2/3 Load Factor (rehash point)")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));
    }

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len() - 1).map(|i| (i, average_probes[method_idx][i])),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..num_keys.len() - 1).map(|i| {
            Circle::new((i, average_probes[method_idx][i]), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: worst-case probes
    let root = BitMapBackend::new("worst_case_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_worst = worst_case_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Worst-Case Probe Chains", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_labels(num_keys.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Worst-Case Probe Count")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len() - 1).map(|i| (i, worst_case_probes[method_idx][i] as f64)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..num_keys.len() - 1).map(|i| {
            Circle::new((i, worst_case_probes[method_idx][i] as f64), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot images: average_probes.png, worst_case_probes.png");

    Ok(())
}
