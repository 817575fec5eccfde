use std::{cmp::Ordering, num::ParseIntError};

use anyhow::{Context, Result};
use kver::{FixedRelease, ReleaseSource, Version};
use log::debug;
use structopt::StructOpt;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "kver_cli")]
struct CliArgs {
    /// Output debug info
    #[structopt(short = "v", long = "verbose", global = true)]
    verbose: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Show release, version and version code of the running kernel
    Info {
        /// Use this release string instead of asking the kernel
        #[structopt(short = "r", long = "release")]
        release: Option<String>,
    },
    /// Unpack a LINUX_VERSION_CODE, decimal or 0x prefixed hex
    Decode {
        #[structopt(parse(try_from_str = parse_code))]
        code: u32,
    },
    /// Pack a dotted version into a LINUX_VERSION_CODE
    Encode { version: String },
    /// Compare two dotted versions
    Compare { a: String, b: String },
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    let output = run(args.command)?;
    println!("{}", output);
    Ok(())
}

fn run(command: Command) -> Result<String> {
    debug!("Running {:?}", command);
    match command {
        Command::Info { release: Some(release) } => info(&FixedRelease(release)),
        Command::Info { release: None } => running_kernel_info(),
        Command::Decode { code } => Ok(decode(code)),
        Command::Encode { version } => encode(&version),
        Command::Compare { a, b } => compare(&a, &b),
    }
}

#[cfg(unix)]
fn running_kernel_info() -> Result<String> {
    info(&kver::Uname)
}

#[cfg(not(unix))]
fn running_kernel_info() -> Result<String> {
    anyhow::bail!("No release given and the running kernel can not be queried on this platform")
}

fn info(source: &dyn ReleaseSource) -> Result<String> {
    let release = kver::kernel_release_from(source)?;
    let version = Version::from_kernel_release(&release)
        .with_context(|| format!("Could not read a version from release {:?}", release))?;

    Ok(format!(
        "release: {}\nversion: {}\ncode:    {} ({:#08x})",
        release,
        version,
        version.kernel(),
        version.kernel()
    ))
}

fn decode(code: u32) -> String {
    if code > 0xffffff {
        log::warn!("Ignoring bits above 23 of {:#x}", code);
    }
    Version::from_code(code).to_string()
}

fn encode(version: &str) -> Result<String> {
    let version: Version = parse_version(version)?;
    let code = version.kernel();
    if Version::from_code(code) != version {
        log::warn!(
            "{} does not fit into a version code, packed as {}",
            version,
            Version::from_code(code)
        );
    }
    Ok(format!("{} ({:#08x})", code, code))
}

fn compare(a: &str, b: &str) -> Result<String> {
    let (a, b) = (parse_version(a)?, parse_version(b)?);
    let sign = match a.cmp(&b) {
        Ordering::Less => '<',
        Ordering::Equal => '=',
        Ordering::Greater => '>',
    };
    Ok(format!("{} {} {}", a, sign, b))
}

fn parse_version(version: &str) -> Result<Version> {
    version
        .parse()
        .with_context(|| format!("Could not parse version argument {:?}", version))
}

fn parse_code(code: &str) -> Result<u32, ParseIntError> {
    match code.strip_prefix("0x").or_else(|| code.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => code.parse(),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn info_from_release() {
        let output = info(&FixedRelease::from("4.9.337-android")).unwrap();
        assert_eq!(
            output,
            "release: 4.9.337-android\nversion: 4.9.337\ncode:    264703 (0x0409ff)"
        );
    }

    #[test]
    fn info_failures() {
        let err = info(&FixedRelease::from("5.4")).unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "Could not read a version from release \"5.4\": invalid version: 5.4"
        );

        let failing =
            || -> io::Result<String> { Err(io::Error::new(io::ErrorKind::Other, "no uts")) };
        let err = info(&failing).unwrap_err();
        assert_eq!(err.to_string(), "failed to query kernel release: no uts");
    }

    #[test]
    fn info_command_with_release() {
        let output = run(Command::Info {
            release: Some(String::from("6.7.9-200.fc39.x86_64")),
        })
        .unwrap();
        assert!(output.contains("version: 6.7.9"), "{}", output);
    }

    #[test]
    fn decode_codes() {
        assert_eq!(decode(0), "0.0.0");
        assert_eq!(decode(0x404ff), "4.4.255");
        assert_eq!(decode(264576), "4.9.128");
        assert_eq!(decode(0x1_060709), "6.7.9");
    }

    #[test]
    fn parse_codes() {
        assert_eq!(parse_code("264576"), Ok(264576));
        assert_eq!(parse_code("0x404ff"), Ok(0x404ff));
        assert_eq!(parse_code("0XFFFFFF"), Ok(0xffffff));
        assert!(parse_code("0xzz").is_err());
        assert!(parse_code("-1").is_err());
    }

    #[test]
    fn encode_versions() {
        assert_eq!(encode("4.9.128").unwrap(), "264576 (0x040980)");
        assert_eq!(encode("256.256.256").unwrap(), "255 (0x0000ff)");
        assert_eq!(encode("1").unwrap(), "65536 (0x010000)");
        assert!(encode("1.2.3.4").is_err());
    }

    #[test]
    fn compare_versions() {
        assert_eq!(compare("1.2", "2.2.1").unwrap(), "1.2.0 < 2.2.1");
        assert_eq!(compare("2.0.0", "1.2").unwrap(), "2.0.0 > 1.2.0");
        assert_eq!(compare("5.4", "5.4.0").unwrap(), "5.4.0 = 5.4.0");
        assert_eq!(compare("1.10", "1.9").unwrap(), "1.10.0 > 1.9.0");

        let err = compare("1.2", "x").unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "Could not parse version argument \"x\": invalid version: x"
        );
    }
}
