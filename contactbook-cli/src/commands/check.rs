//! Contact field checks from the command line

use anyhow::{Context, Result};
use clap::Parser;
use contactbook_core::format::format_us_phone_number;
use contactbook_core::{validate_contact_input, RawContactInput};

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Contact name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Contact email
    #[arg(long, default_value = "")]
    pub email: String,

    /// Contact phone
    #[arg(long, default_value = "")]
    pub phone: String,
}

/// Arguments for the format-phone command
#[derive(Parser, Debug)]
pub struct FormatPhoneArgs {
    /// Phone number as typed
    pub value: String,
}

/// Validate contact fields, printing the normalized record
pub fn run_check(args: CheckArgs) -> Result<()> {
    let raw = RawContactInput::new(args.name, args.email, args.phone);
    let input = validate_contact_input(&raw).context("Contact is invalid")?;

    println!("name:  {}", input.name());
    println!("email: {}", input.email());
    println!("phone: {}", format_us_phone_number(input.phone()));
    Ok(())
}

pub fn run_format_phone(args: FormatPhoneArgs) -> Result<()> {
    println!("{}", format_us_phone_number(&args.value));
    Ok(())
}
