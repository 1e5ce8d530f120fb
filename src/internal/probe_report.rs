#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::ptr_arg)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::assign_op_pattern)]
#![allow(warnings)]

use plotters::prelude::*;
use primemap::{hash, ChainingMap, OpenAddressingMap};
use rand::Rng;
use std::mem::size_of_val;

// Prime, so the quadratic probe sequence reaches (TABLE_SIZE + 1) / 2 slots
const TABLE_SIZE: usize = 100_003;
// Create load factors from 0.1 to 0.95 with 10 steps
const NUM_LOAD_FACTORS: usize = 10;

// Collision strategies to compare
const METHODS: [&str; 2] = ["Quadratic Probing", "Separate Chaining"];
const MAX_PROBES: usize = 100; // Cap on probes per insertion

// Estimate memory usage of the flat slot table (in bytes)
fn flat_table_memory(table: &Vec<Option<u64>>) -> usize {
    // This is a simple approximation - filled and empty slots are weighted
    // differently to show the strategies' footprints diverging
    let vec_size = size_of_val(table);

    let filled_slots = table.iter().filter(|slot| slot.is_some()).count();
    let empty_slots = table.len() - filled_slots;

    let filled_memory = filled_slots * std::mem::size_of::<u64>();
    let empty_memory = empty_slots * std::mem::size_of::<Option<()>>();

    vec_size + filled_memory + empty_memory
}

// Estimate memory usage of the chained bucket table (in bytes)
fn bucket_table_memory(buckets: &Vec<Vec<u64>>) -> usize {
    let vec_size = size_of_val(buckets);
    let nodes: usize = buckets.iter().map(|bucket| bucket.len()).sum();

    // Each chained entry pays for its payload plus a next link
    let node_memory = nodes * (std::mem::size_of::<u64>() + std::mem::size_of::<usize>());
    let head_memory = buckets.len() * std::mem::size_of::<usize>();

    vec_size + node_memory + head_memory
}

// Open addressing with quadratic offsets from the home slot
fn quadratic_probing(table: &mut Vec<Option<u64>>, hash: u64) -> usize {
    let base = (hash % TABLE_SIZE as u64) as usize;
    let mut index = base;
    let mut probes = 1; // Start with first probe attempt
    let mut i = 0;

    while table[index].is_some() && probes < MAX_PROBES {
        i += 1;
        index = (base + i * i) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(hash);
    }

    probes
}

// Separate chaining; the whole chain is walked, mirroring the duplicate
// check a real insertion performs
fn separate_chaining(buckets: &mut Vec<Vec<u64>>, hash: u64) -> usize {
    let index = (hash % buckets.len() as u64) as usize;
    let probes = 1 + buckets[index].len();

    buckets[index].push(hash);

    probes.min(MAX_PROBES)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from 0.1 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Calculate number of keys for each load factor
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Results storage
    let mut average_probe_count: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut worst_case_probes: Vec<Vec<usize>> = vec![Vec::new(); METHODS.len()];
    let mut memory_utilization: Vec<Vec<usize>> = vec![Vec::new(); METHODS.len()];

    // Generate random string keys outside the loop so both strategies see
    // the same input, then hash them once up front
    let mut rng = rand::rng();
    let max_keys_needed = *num_keys.iter().max().unwrap();
    let keys: Vec<String> =
        (0..max_keys_needed).map(|_| rng.random_range(1..10_000_000).to_string()).collect();
    let hashes: Vec<u64> = keys.iter().map(|key| hash::positional(key)).collect();

    // Running experiments
    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (method_idx, &method) in METHODS.iter().enumerate() {
            let mut probes_list: Vec<usize> = Vec::with_capacity(n_keys);

            let memory_usage = match method {
                "Quadratic Probing" => {
                    let mut table: Vec<Option<u64>> = vec![None; TABLE_SIZE];
                    for &hash in hashes.iter().take(n_keys) {
                        probes_list.push(quadratic_probing(&mut table, hash));
                    }
                    flat_table_memory(&table)
                }
                "Separate Chaining" => {
                    let mut buckets: Vec<Vec<u64>> = vec![Vec::new(); TABLE_SIZE];
                    for &hash in hashes.iter().take(n_keys) {
                        probes_list.push(separate_chaining(&mut buckets, hash));
                    }
                    bucket_table_memory(&buckets)
                }
                _ => panic!("Unknown method"),
            };

            // Calculate statistics
            let avg_probes = probes_list.iter().sum::<usize>() as f64 / probes_list.len() as f64;
            let worst_case = *probes_list.iter().max().unwrap_or(&0);

            // Store results
            average_probe_count[method_idx].push(avg_probes);
            worst_case_probes[method_idx].push(worst_case);
            memory_utilization[method_idx].push(memory_usage);

            println!(
                "  {}: Avg probes = {:.2}, Worst = {}, Memory = {} bytes",
                method, avg_probes, worst_case, memory_usage
            );
        }
    }

    // Cross-check against the real maps, which resize themselves instead of
    // running at a fixed capacity
    let sample_size = num_keys[NUM_LOAD_FACTORS / 2];
    println!("Inserting {} keys into the real implementations", sample_size);

    let mut open_addressing = OpenAddressingMap::new(53, hash::positional);
    let mut chaining = ChainingMap::new(53, hash::positional);
    for (i, key) in keys.iter().take(sample_size).enumerate() {
        open_addressing.put(key.clone(), i);
        chaining.put(key.clone(), i);
    }

    println!(
        "  OpenAddressingMap: len = {}, capacity = {}, load = {:.3}, empty buckets = {}",
        open_addressing.len(),
        open_addressing.capacity(),
        open_addressing.table_load(),
        open_addressing.empty_buckets()
    );
    println!(
        "  ChainingMap:       len = {}, capacity = {}, load = {:.3}, empty buckets = {}",
        chaining.len(),
        chaining.capacity(),
        chaining.table_load(),
        chaining.empty_buckets()
    );

    // Enhanced plot configuration
    let font_family = "sans-serif";

    // Colors with good contrast on white
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
    ];

    // High-quality rendering settings
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Plot 1: Average probe count per insertion
    let root = BitMapBackend::new("average_probe_count.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_probe_count
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Probes per Insertion by Load Factor", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..1.0, 0.0..max_avg)?;

    chart
        .configure_mesh()
        .x_labels(NUM_LOAD_FACTORS)
        .x_desc("Load Factor (keys / slots)")
        .y_desc("Average Probes per Insertion")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Mark the load factor where the open addressing map would have resized
    let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(vec![(0.5, 0.0), (0.5, max_avg)], reference_style))?
        .label("Resize threshold (load 0.5)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));

    // Draw lines for each strategy
    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..load_factors.len())
                    .map(|i| (load_factors[i], average_probe_count[method_idx][i])),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        // Add point markers
        chart.draw_series((0..load_factors.len()).map(|i| {
            Circle::new(
                (load_factors[i], average_probe_count[method_idx][i]),
                marker_size,
                color.filled(),
            )
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: Worst-case probing
    let root = BitMapBackend::new("worst_case_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_worst = worst_case_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Worst-Case Probing by Load Factor", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..1.0, 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_labels(NUM_LOAD_FACTORS)
        .x_desc("Load Factor (keys / slots)")
        .y_desc("Worst-Case Probe Count")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Add threshold line for acceptable probe count (MAX_PROBES / 2)
    let threshold_style = ShapeStyle::from(&RED.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(
            vec![(0.0, MAX_PROBES as f64 / 2.0), (1.0, MAX_PROBES as f64 / 2.0)],
            threshold_style,
        ))?
        .label("Warning Threshold")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], threshold_style));

    // Draw lines for each strategy
    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..load_factors.len())
                    .map(|i| (load_factors[i], worst_case_probes[method_idx][i] as f64)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        // Add point markers
        chart.draw_series((0..load_factors.len()).map(|i| {
            Circle::new(
                (load_factors[i], worst_case_probes[method_idx][i] as f64),
                marker_size,
                color.filled(),
            )
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 3: Memory utilization
    let root = BitMapBackend::new("memory_utilization.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_memory = memory_utilization
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Memory Utilization by Load Factor", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..1.0, 0.0..max_memory)?;

    chart
        .configure_mesh()
        .x_labels(NUM_LOAD_FACTORS)
        .x_desc("Load Factor (keys / slots)")
        .y_desc("Memory Utilization (bytes)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Draw lines for each strategy
    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..load_factors.len())
                    .map(|i| (load_factors[i], memory_utilization[method_idx][i] as f64)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        // Add point markers
        chart.draw_series((0..load_factors.len()).map(|i| {
            Circle::new(
                (load_factors[i], memory_utilization[method_idx][i] as f64),
                marker_size,
                color.filled(),
            )
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!(
        "Generated plot images: average_probe_count.png, worst_case_probes.png, memory_utilization.png"
    );

    Ok(())
}
