#[cfg(feature = "priority-queue")]
use processor::simulate_preemptive_priority;
#[cfg(not(feature = "priority-queue"))]
use processor::simulate_round_robin;
use processor::Simulation;
use scheduler::ProcessInput;

use std::env;
use std::fs;


fn write_logs(folder: &str, name: &str, logs: &str) {
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{}.log", file_name(name)),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{}.log",
        file_name(name)
    ))
    .unwrap()
}

fn run(folder: &str, name: &str, simulation: &Simulation) {
    let output = simulation.report().to_string();

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

#[cfg_attr(feature = "priority-queue", allow(dead_code))]
fn quantum() -> i64 {
    env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<i64>()
        .unwrap()
}

fn processes(list: &[(usize, i64, i64, i32)]) -> Vec<ProcessInput> {
    list.iter()
        .map(|&(pid, arrival, burst, priority)| ProcessInput::new(pid, arrival, burst, priority))
        .collect()
}

#[cfg(not(feature = "priority-queue"))]
static SCHEDULER: &str = "round-robin";
#[cfg(not(feature = "priority-queue"))]
fn file_name(name: &str) -> String {
    format!("{name}___{}", quantum())
}
#[cfg(not(feature = "priority-queue"))]
fn simulate(processes: &[ProcessInput]) -> Simulation {
    let quantum = quantum();

    println!("Quantum {quantum}");
    simulate_round_robin(processes, quantum).unwrap()
}

#[cfg(feature = "priority-queue")]
static SCHEDULER: &str = "priority-queue";
#[cfg(feature = "priority-queue")]
fn file_name(name: &str) -> String {
    name.to_string()
}
#[cfg(feature = "priority-queue")]
fn simulate(processes: &[ProcessInput]) -> Simulation {
    simulate_preemptive_priority(processes).unwrap()
}
