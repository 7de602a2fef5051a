use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use fatmod_filesystems::{dump_ascii, dump_hex, Fat32Volume, FileName};

#[derive(Parser)]
#[command(name = "fatmod")]
#[command(about = "Edit a FAT32 disk image directly, without mounting it", long_about = None)]
struct Cli {
    /// FAT32 disk image to operate on
    image: Option<PathBuf>,

    /// List the root directory (one "NAME SIZE" line per file)
    #[arg(short = 'l')]
    list: bool,

    /// Create an empty file
    #[arg(short = 'c', value_name = "NAME")]
    create: Option<String>,

    /// Write a repeated byte into a file
    #[arg(
        short = 'w',
        num_args = 4,
        value_names = ["NAME", "START", "LENGTH", "BYTE"],
        allow_negative_numbers = true
    )]
    write: Option<Vec<String>>,

    /// Read a file; requires exactly one of -b or -a
    #[arg(short = 'r')]
    read: bool,

    /// With -r: dump the file as offset-prefixed hex
    #[arg(short = 'b', value_name = "NAME")]
    binary: Option<String>,

    /// With -r: dump the file as raw bytes
    #[arg(short = 'a', value_name = "NAME")]
    ascii: Option<String>,

    /// Delete a file and free its clusters
    #[arg(short = 'd', value_name = "NAME")]
    delete: Option<String>,
}

#[derive(Debug)]
enum Command {
    List,
    Create(String),
    Write {
        name: String,
        start: u32,
        length: u32,
        fill: u8,
    },
    ReadHex(String),
    ReadAscii(String),
    Delete(String),
}

/// Reduce the parsed flags to exactly one operation, or explain why the
/// combination is malformed. Nothing here touches the image.
fn resolve_command(cli: &Cli) -> Result<Command, String> {
    let mut commands = Vec::new();

    if cli.list {
        commands.push(Command::List);
    }
    if let Some(name) = &cli.create {
        commands.push(Command::Create(name.clone()));
    }
    if let Some(args) = &cli.write {
        commands.push(parse_write_args(args)?);
    }
    if let Some(name) = &cli.delete {
        commands.push(Command::Delete(name.clone()));
    }

    match (cli.read, &cli.binary, &cli.ascii) {
        (true, Some(_), Some(_)) => {
            return Err("-b and -a cannot be combined".to_string());
        }
        (true, Some(name), None) => commands.push(Command::ReadHex(name.clone())),
        (true, None, Some(name)) => commands.push(Command::ReadAscii(name.clone())),
        (true, None, None) => {
            return Err("-r requires -b or -a".to_string());
        }
        (false, None, None) => {}
        (false, _, _) => {
            return Err("-b and -a are only valid with -r".to_string());
        }
    }

    if commands.len() > 1 {
        return Err("exactly one operation may be given".to_string());
    }
    commands
        .pop()
        .ok_or_else(|| "no operation given".to_string())
}

/// Parse the four positional values of -w. A repeated -w appends to the
/// same value list, so anything but exactly four values is rejected.
/// Negative numbers parse but are rejected here, before any image access.
fn parse_write_args(args: &[String]) -> Result<Command, String> {
    if args.len() != 4 {
        return Err("-w may be given only once, with NAME START LENGTH BYTE".to_string());
    }

    let start: i64 = args[1]
        .parse()
        .map_err(|_| format!("start offset '{}' is not a number", args[1]))?;
    let length: i64 = args[2]
        .parse()
        .map_err(|_| format!("length '{}' is not a number", args[2]))?;
    let fill: i64 = args[3]
        .parse()
        .map_err(|_| format!("fill byte '{}' is not a number", args[3]))?;

    if start < 0 || start > u32::MAX as i64 {
        return Err(format!("start offset {} is out of range", start));
    }
    if length < 0 || length > u32::MAX as i64 {
        return Err(format!("length {} is out of range", length));
    }
    if !(0..=255).contains(&fill) {
        return Err(format!("fill byte {} is out of range (0-255)", fill));
    }

    Ok(Command::Write {
        name: args[0].clone(),
        start: start as u32,
        length: length as u32,
        fill: fill as u8,
    })
}

fn run(volume: &mut Fat32Volume, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List => {
            for file in volume.list_root()? {
                println!("{} {}", file.name, file.size);
            }
        }
        Command::Create(name) => {
            let name = FileName::parse(&name)?;
            volume.create_file(&name)?;
        }
        Command::Write {
            name,
            start,
            length,
            fill,
        } => {
            let name = FileName::parse(&name)?;
            volume.write_file(&name, start, length, fill)?;
        }
        Command::ReadHex(name) => {
            let name = FileName::parse(&name)?;
            let data = volume.read_file(&name)?;
            let stdout = io::stdout();
            dump_hex(&mut stdout.lock(), &data)?;
        }
        Command::ReadAscii(name) => {
            let name = FileName::parse(&name)?;
            let data = volume.read_file(&name)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            dump_ascii(&mut out, &data)?;
            out.flush()?;
        }
        Command::Delete(name) => {
            let name = FileName::parse(&name)?;
            volume.delete_file(&name)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let command = match resolve_command(&cli) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("invalid arguments: {}", msg);
            eprintln!("run 'fatmod -h' for usage");
            process::exit(1);
        }
    };

    let image = match &cli.image {
        Some(image) => image,
        None => {
            eprintln!("invalid arguments: no disk image given");
            eprintln!("run 'fatmod -h' for usage");
            process::exit(1);
        }
    };

    let mut volume = match Fat32Volume::open(image) {
        Ok(volume) => volume,
        Err(e) => {
            eprintln!("could not open disk image: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&mut volume, command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
