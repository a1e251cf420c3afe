//! Almanac Information Tool
//!
//! Prints the slowly varying astronomical quantities for one epoch: mean
//! obliquity, nutation deltas, barycentric Earth velocity, aberration
//! rapidity and the precession angles. Optionally computes the apparent
//! place of a catalog J2000 position.
//!
//! Usage:
//!   cargo run --bin almanac_info -- [--jd 2460000.5]
//!   cargo run --bin almanac_info -- --utc 2026-03-20T12:00:00Z --ra "5:55:10.3" --dec "+07:24:25"

use chrono::{DateTime, Utc};
use clap::Parser;

use skyframe::almanac::Almanac;
use skyframe::coordinates::{spherical, unit_vector, Angle};
use skyframe::transforms::precession_angles;
use skyframe::JulianDate;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Almanac Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Displays obliquity, nutation, Earth velocity and aberration data for an epoch",
    long_about = None
)]
struct Args {
    /// Epoch as a Julian date (TT), e.g. 2460000.5
    #[arg(long, conflicts_with = "utc")]
    jd: Option<f64>,

    /// Epoch as an RFC 3339 UTC timestamp, e.g. 2026-03-20T12:00:00Z
    #[arg(long)]
    utc: Option<String>,

    /// Right ascension of a catalog J2000 position (sexagesimal hours not
    /// supported; give degrees, e.g. "88:52:34.5" or "88.876")
    #[arg(long, requires = "dec")]
    ra: Option<String>,

    /// Declination of a catalog J2000 position, e.g. "+07:24:25"
    #[arg(long, requires = "ra")]
    dec: Option<String>,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn parse_angle(text: &str) -> Result<Angle> {
    if let Ok(degrees) = text.parse::<f64>() {
        return Ok(Angle::from_degrees(degrees));
    }
    Ok(Angle::parse_sexagesimal(text)?)
}

fn resolve_epoch(args: &Args) -> Result<JulianDate> {
    if let Some(jd) = args.jd {
        return Ok(JulianDate::new(jd));
    }
    if let Some(text) = &args.utc {
        let stamp: DateTime<Utc> = text.parse()?;
        return Ok(JulianDate::from_utc(&stamp));
    }
    Ok(JulianDate::from_utc(&Utc::now()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let jd = resolve_epoch(&args)?;
    let almanac = Almanac::new(jd)?;

    println!("Epoch: {}", jd);
    println!(
        "Julian centuries since J2000: {:+.6}",
        jd.centuries_since_j2000()
    );

    print_section_header("Orientation of the Earth");
    println!("Mean obliquity: {:.6} deg", almanac.obliquity().degrees());
    let nutation = almanac.nutation();
    println!(
        "Nutation in longitude: {:+.4} arcsec",
        nutation.longitude * 3600.0
    );
    println!(
        "Nutation in obliquity: {:+.4} arcsec",
        nutation.obliquity * 3600.0
    );
    let (zeta, z, theta) = precession_angles(jd);
    println!(
        "Precession angles: zeta={:+.6} deg, z={:+.6} deg, theta={:+.6} deg",
        zeta.degrees(),
        z.degrees(),
        theta.degrees()
    );

    print_section_header("Annual Aberration");
    let velocity = almanac.earth_velocity();
    println!(
        "Earth velocity (equatorial J2000): [{:+.4}, {:+.4}, {:+.4}] km/s",
        velocity.x, velocity.y, velocity.z
    );
    println!("Speed: {:.4} km/s", velocity.norm());
    println!("Rapidity: {:.12}", almanac.rapidity());
    let r = almanac.rapidity();
    println!(
        "Maximum displacement: {:.3} arcsec",
        ((r - 1.0 / r) / 2.0).asin().to_degrees() * 3600.0
    );

    if let (Some(ra_text), Some(dec_text)) = (&args.ra, &args.dec) {
        let ra = parse_angle(ra_text)?;
        let dec = parse_angle(dec_text)?;
        let apparent = almanac.apparent_place(&unit_vector(ra, dec));
        let (app_ra, app_dec) = spherical(&apparent);
        print_section_header("Apparent Place");
        println!(
            "Catalog J2000:  RA {:>12.6} deg  Dec {:+12.6} deg",
            ra.degrees(),
            dec.degrees()
        );
        println!(
            "Apparent:       RA {:>12.6} deg  Dec {:+12.6} deg",
            app_ra.degrees(),
            app_dec.degrees()
        );
    }

    Ok(())
}
