//! Inloop - matrix streaming front end for a hardware-in-the-loop solver.
//!
//! # Usage
//!
//! ```bash
//! # Emit the frame stream for built-in topology 1 (pipe to the serial port)
//! inloop preset 1 > /dev/ttyUSB0
//!
//! # Stamp a JSON netlist and print the assembled system
//! inloop stamp circuit.json
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use inloop_core::{
    circuit::{CircuitElement, CircuitSystem, ElementDef},
    error::{InloopError, Result},
    protocol::MatrixSender,
    topology,
};

/// Hardware-in-the-loop solver front end
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit the complete frame stream for a built-in topology preset
    Preset {
        /// Preset id from the device's topology table
        id: u32,

        /// Matrix-set id to bind on the device
        #[arg(short, long, default_value_t = 0)]
        matrix_id: u32,

        /// Write the byte stream to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Stamp a JSON netlist and print the assembled system
    Stamp {
        /// Path to the netlist file
        #[arg(value_name = "NETLIST_FILE")]
        netlist: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Preset {
            id,
            matrix_id,
            out,
        } => emit_preset(id, matrix_id, out),
        Command::Stamp { netlist } => stamp_netlist(&netlist),
    }
}

fn emit_preset(id: u32, matrix_id: u32, out: Option<PathBuf>) -> Result<()> {
    let preset = topology::preset(id)?;
    let sender = MatrixSender::new(matrix_id);
    let frames = topology::frame_sequence(&sender, &preset)?;

    let stream: Vec<u8> = frames.concat();
    info!(
        "topology {}: {} frames, {} bytes",
        id,
        frames.len(),
        stream.len()
    );

    match out {
        Some(path) => fs::write(&path, &stream).map_err(|source| InloopError::StreamWriteError {
            target: path.display().to_string(),
            source,
        })?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&stream)
                .and_then(|()| stdout.flush())
                .map_err(|source| InloopError::StreamWriteError {
                    target: "<stdout>".to_string(),
                    source,
                })?;
        }
    }
    Ok(())
}

fn stamp_netlist(path: &PathBuf) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|source| InloopError::FileReadError {
        path: path.display().to_string(),
        source,
    })?;
    let defs: Vec<ElementDef> = serde_json::from_str(&text)?;
    let elements = CircuitElement::from_defs(&defs)?;
    let system = CircuitSystem::build(elements)?;

    info!("stamped {} elements", system.elements().len());
    println!("system size: {}", system.size());
    for row in 0..system.size() {
        let entries: Vec<String> = (0..system.size())
            .map(|col| format!("{:>12.6}", system.matrix().get(row, col)))
            .collect();
        println!("[ {} ]", entries.join(" "));
    }
    let rhs: Vec<String> = system.rhs().iter().map(|v| format!("{v:.6}")).collect();
    println!("rhs: [ {} ]", rhs.join(" "));
    Ok(())
}
