//! Command parsing and execution.

use std::io::{self, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::Subcommand;
use tracing::warn;

use parish_core::auth::SignupRequest;
use parish_core::models::{CertificateType, HolyItem, NewHolyItem, NewMassIntention, RequestStatus};
use parish_core::utils::{format_date, format_optional, month_name, truncate_string};
use parish_core::{ApiError, Config, Gateway};

/// Width of the name column in item listings
const NAME_WIDTH: usize = 28;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in (password is prompted)
    Login {
        /// Mobile number; defaults to the last one used
        mobile_number: Option<String>,
    },

    /// Create an account (password is prompted)
    Signup {
        /// Full name
        #[arg(long)]
        name: String,

        /// Mobile number used to log in
        #[arg(long)]
        mobile: String,

        /// Email address
        #[arg(long)]
        email: String,
    },

    /// Forget stored credentials
    Logout,

    /// Exchange the refresh token for a new session
    Refresh,

    /// Show backend and login state
    Status,

    /// Today's birthdays, notifications and schedule
    Home,

    /// List holy items
    Items,

    /// Add a holy item to the inventory (administrators only)
    AddItem {
        /// Item name
        name: String,

        /// Units in stock
        #[arg(value_parser = clap::value_parser!(i64).range(0..))]
        stock: i64,

        /// List the item without making it orderable yet
        #[arg(long)]
        unavailable: bool,

        /// Date the item becomes available (YYYY-MM-DD)
        #[arg(long)]
        available_from: Option<String>,

        /// Short description
        #[arg(long)]
        description: Option<String>,
    },

    /// Order a holy item
    Order {
        /// Item id, as shown by `items`
        item_id: i64,

        /// Number of units
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        quantity: i64,
    },

    /// List my orders
    Orders,

    /// List my mass intentions
    Intentions,

    /// Request a mass intention
    Intend {
        /// Who the mass is offered for
        intention_for: String,

        /// Date of the mass (YYYY-MM-DD)
        date: String,

        /// Intention text
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// List my certificate requests
    Certificates,

    /// Request a certificate (BAPTISM, CONFIRMATION, MARRIAGE, FIRST_COMMUNION)
    RequestCertificate {
        /// Certificate type
        kind: CertificateType,

        /// Optional remarks for the parish office
        remarks: Vec<String>,
    },

    /// Altar-service schedule
    Schedule,

    /// Monthly newsletters
    Newsletters,

    /// Parish notifications
    Notifications,

    /// Birthdays today, or in a given month
    Birthdays {
        /// Month number (1-12)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// My account and parish profile
    Profile,
}

/// Turn a backend error into the message a user should see
fn report(err: ApiError, fallback: &str) -> anyhow::Error {
    if err.is_unauthorized() {
        return anyhow!("Your session has expired. Run `parish login` to sign in again.");
    }
    if let ApiError::InvalidRequest(message) = err {
        return anyhow!(message);
    }
    warn!(error = %err, "Request failed");
    anyhow!(err.display_message(fallback))
}

pub async fn run(command: Command, gateway: &Gateway, config: &mut Config) -> Result<()> {
    match command {
        Command::Login { mobile_number } => login(gateway, config, mobile_number).await,
        Command::Signup { name, mobile, email } => signup(gateway, name, mobile, email).await,
        Command::Logout => {
            gateway.auth().logout().context("Failed to clear stored credentials")?;
            println!("Logged out.");
            Ok(())
        }
        Command::Refresh => {
            gateway
                .auth()
                .refresh()
                .await
                .map_err(|e| report(e, "Could not refresh the session."))?;
            println!("Session refreshed.");
            Ok(())
        }
        Command::Status => {
            println!("Backend:   {}", gateway.base_url());
            let state = if gateway.auth().is_authenticated() { "logged in" } else { "logged out" };
            println!("Session:   {}", state);
            if let Some(ref mobile) = config.last_mobile_number {
                println!("Last user: {}", mobile);
            }
            Ok(())
        }
        Command::Home => home(gateway).await,
        Command::Items => items(gateway).await,
        Command::AddItem {
            name,
            stock,
            unavailable,
            available_from,
            description,
        } => {
            let item = NewHolyItem {
                item_name: name,
                stock,
                available: !unavailable,
                availability_date: available_from,
                description,
            };
            add_item(gateway, &item).await
        }
        Command::Order { item_id, quantity } => {
            let items = gateway
                .holy_items()
                .available()
                .await
                .map_err(|e| report(e, "Failed to load holy items."))?
                .data_or_default();
            check_order(&items, item_id, quantity)?;

            let resp = gateway
                .holy_items()
                .place_order(item_id, quantity)
                .await
                .map_err(|e| report(e, "Failed to place order."))?;
            if !resp.success {
                return Err(anyhow!(format_optional(resp.message.as_deref(), "Failed to place order.")));
            }
            println!("{}", format_optional(resp.message.as_deref(), "Order placed successfully."));
            Ok(())
        }
        Command::Orders => orders(gateway).await,
        Command::Intentions => intentions(gateway).await,
        Command::Intend { intention_for, date, description } => {
            let intention = NewMassIntention {
                intention_for,
                intention_date: date,
                description: description.join(" "),
            };
            gateway
                .mass_intentions()
                .create(&intention)
                .await
                .map_err(|e| report(e, "Failed to submit mass intention."))?
                .into_data()
                .map_err(|e| report(e, "Failed to submit mass intention."))?;
            println!("Mass intention submitted.");
            Ok(())
        }
        Command::Certificates => certificates(gateway).await,
        Command::RequestCertificate { kind, remarks } => {
            let remarks = (!remarks.is_empty()).then(|| remarks.join(" "));
            let resp = gateway
                .certificates()
                .request(kind, remarks.as_deref())
                .await
                .map_err(|e| report(e, "Failed to request certificate."))?;
            if !resp.success {
                return Err(anyhow!(format_optional(resp.message.as_deref(), "Failed to request certificate.")));
            }
            println!("{} requested.", kind.label());
            Ok(())
        }
        Command::Schedule => schedule(gateway).await,
        Command::Newsletters => newsletters(gateway).await,
        Command::Notifications => notifications(gateway).await,
        Command::Birthdays { month } => birthdays(gateway, month).await,
        Command::Profile => profile(gateway).await,
    }
}

async fn login(gateway: &Gateway, config: &mut Config, mobile_number: Option<String>) -> Result<()> {
    let mobile_number = match mobile_number.or_else(|| config.last_mobile_number.clone()) {
        Some(m) => m,
        None => prompt("Mobile number: ")?,
    };
    let password = rpassword::prompt_password("Password: ")?;
    if mobile_number.is_empty() || password.is_empty() {
        return Err(anyhow!("Please fill all fields"));
    }

    println!("\nAuthenticating...");
    gateway
        .auth()
        .login(&mobile_number, &password)
        .await
        .map_err(|e| {
            if e.is_unauthorized() {
                anyhow!(e.display_message("Login failed. Please check your credentials."))
            } else {
                report(e, "Login failed. Please check your credentials.")
            }
        })?;

    config.last_mobile_number = Some(mobile_number);
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    println!("Login successful!");
    Ok(())
}

async fn signup(gateway: &Gateway, name: String, mobile_number: String, email: String) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let request = SignupRequest {
        name,
        mobile_number,
        password,
        email,
    };

    gateway
        .auth()
        .signup(&request)
        .await
        .map_err(|e| report(e, "Signup failed. Please try again."))?;
    println!("Account created successfully! Run `parish login` to sign in.");
    Ok(())
}

async fn add_item(gateway: &Gateway, item: &NewHolyItem) -> Result<()> {
    let user = gateway
        .profile()
        .profile()
        .await
        .map_err(|e| report(e, "Failed to load profile."))?;
    if !user.can_manage_inventory() {
        bail!("Only parish administrators can add holy items.");
    }

    let resp = gateway
        .holy_items()
        .add(item)
        .await
        .map_err(|e| report(e, "Failed to add item"))?;
    if !resp.success {
        bail!(format_optional(resp.message.as_deref(), "Failed to add item"));
    }
    println!("Holy item added successfully!");
    Ok(())
}

/// Refuse an order the current inventory cannot fill
fn check_order(items: &[HolyItem], item_id: i64, quantity: i64) -> Result<()> {
    let item = items
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| anyhow!("No holy item with id {}", item_id))?;
    if item.can_order(quantity) {
        return Ok(());
    }
    if !item.available || item.stock <= 0 {
        bail!("{} is out of stock.", item.item_name);
    }
    bail!("Only {} of {} in stock.", item.stock, item.item_name)
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn home(gateway: &Gateway) -> Result<()> {
    let general = gateway.general();
    let (birthdays, notifications, schedules) = futures::join!(
        general.birthdays_today(),
        general.notifications(),
        general.altar_schedules(),
    );

    let birthdays = birthdays.map_err(|e| report(e, "Failed to load home data."))?.data_or_default();
    if !birthdays.is_empty() {
        println!("Today's Birthdays");
        for b in &birthdays {
            let name = b.user.as_ref().map(|u| u.display_name()).unwrap_or("Parishioner");
            println!("  {}  (Feast: {})", name, format_optional(b.feast_name.as_deref(), "-"));
        }
        println!();
    }

    let notifications = notifications.map_err(|e| report(e, "Failed to load home data."))?.data_or_default();
    println!("Notifications");
    if notifications.is_empty() {
        println!("  No notifications");
    }
    for n in notifications.iter().take(5) {
        let date = n.created_at.as_deref().map(format_date).unwrap_or_default();
        println!("  {}  {}", date, n.title);
        if let Some(ref message) = n.message {
            println!("      {}", truncate_string(message, 72));
        }
    }

    let schedules = schedules.map_err(|e| report(e, "Failed to load home data."))?.data_or_default();
    if let Some(next) = schedules.first() {
        println!("\nNext altar service: {}", format_date(&next.service_date));
    }
    Ok(())
}

async fn items(gateway: &Gateway) -> Result<()> {
    let items = gateway
        .holy_items()
        .available()
        .await
        .map_err(|e| report(e, "Failed to load holy items."))?
        .data_or_default();

    if items.is_empty() {
        println!("No holy items available.");
        return Ok(());
    }
    for item in &items {
        let availability = if item.available && item.stock > 0 {
            format!("{} in stock", item.stock)
        } else if let Some(ref date) = item.availability_date {
            format!("available {}", format_date(date))
        } else {
            "out of stock".to_string()
        };
        println!(
            "{:>5}  {:<width$}  {}",
            item.id,
            truncate_string(&item.item_name, NAME_WIDTH),
            availability,
            width = NAME_WIDTH
        );
    }
    Ok(())
}

async fn orders(gateway: &Gateway) -> Result<()> {
    let orders = gateway
        .holy_items()
        .my_orders()
        .await
        .map_err(|e| report(e, "Failed to load orders."))?
        .data_or_default();

    if orders.is_empty() {
        println!("No orders yet.");
    }
    for order in &orders {
        let date = order.ordered_at.as_deref().map(format_date).unwrap_or_default();
        println!(
            "#{:<5} {:<width$} x{:<3} {:<10} {}",
            order.id,
            truncate_string(order.item_name(), NAME_WIDTH),
            order.quantity,
            format_optional(order.status.as_deref(), "-"),
            date,
            width = NAME_WIDTH
        );
    }
    Ok(())
}

async fn intentions(gateway: &Gateway) -> Result<()> {
    let intentions = gateway
        .mass_intentions()
        .mine()
        .await
        .map_err(|e| report(e, "Failed to load mass intentions."))?
        .data_or_default();

    if intentions.is_empty() {
        println!("No mass intentions yet.");
    }
    for intention in &intentions {
        let payment = if intention.is_paid() { "paid" } else { "unpaid" };
        println!(
            "{}  {}  [{} / {}]",
            intention.intention_date.as_deref().map(format_date).unwrap_or_default(),
            intention.intention_for,
            intention.status_kind(),
            payment
        );
        if let Some(ref description) = intention.description {
            println!("    {}", truncate_string(description, 72));
        }
    }
    Ok(())
}

async fn certificates(gateway: &Gateway) -> Result<()> {
    let certificates = gateway
        .certificates()
        .mine()
        .await
        .map_err(|e| report(e, "Failed to load certificates."))?
        .data_or_default();

    if certificates.is_empty() {
        println!("No certificate requests yet.");
    }
    for cert in &certificates {
        let status = match cert.status_kind() {
            RequestStatus::Other => format_optional(cert.status.as_deref(), "-"),
            known => known.to_string(),
        };
        println!(
            "{:<30} {:<10} {}",
            cert.display_name(),
            status,
            cert.requested_at.as_deref().map(format_date).unwrap_or_default()
        );
        if let Some(ref url) = cert.file_url {
            println!("    file: {}", url);
        }
    }
    Ok(())
}

async fn schedule(gateway: &Gateway) -> Result<()> {
    let schedules = gateway
        .general()
        .altar_schedules()
        .await
        .map_err(|e| report(e, "Failed to load altar schedule."))?
        .data_or_default();

    if schedules.is_empty() {
        println!("No altar schedules published.");
    }
    for s in &schedules {
        println!("{}", format_date(&s.service_date));
        println!("  Altar servers: {}", format_optional(s.altar_boys.as_deref(), "-"));
        println!("  Readers:       {}", format_optional(s.readers.as_deref(), "-"));
        println!("  Choir:         {}", format_optional(s.choir_members.as_deref(), "-"));
    }
    Ok(())
}

async fn newsletters(gateway: &Gateway) -> Result<()> {
    let pdfs = gateway
        .general()
        .all_monthly_pdfs()
        .await
        .map_err(|e| report(e, "Failed to load newsletters."))?
        .data_or_default();

    if pdfs.is_empty() {
        println!("No newsletters available.");
    }
    for pdf in &pdfs {
        let uploaded = pdf.uploaded_at.as_deref().map(format_date).unwrap_or_default();
        println!("{} {}  (uploaded {})", month_name(&pdf.month), pdf.year, uploaded);
    }
    Ok(())
}

async fn notifications(gateway: &Gateway) -> Result<()> {
    let notifications = gateway
        .general()
        .notifications()
        .await
        .map_err(|e| report(e, "Failed to load notifications."))?
        .data_or_default();

    if notifications.is_empty() {
        println!("No notifications.");
    }
    for n in &notifications {
        let date = n.created_at.as_deref().map(format_date).unwrap_or_default();
        println!("{}  {}", date, n.title);
        if let Some(ref message) = n.message {
            println!("    {}", message);
        }
    }
    Ok(())
}

async fn birthdays(gateway: &Gateway, month: Option<u32>) -> Result<()> {
    let general = gateway.general();
    let result = match month {
        Some(m) => general.birthdays_by_month(m).await,
        None => general.birthdays_today().await,
    };
    let birthdays = result
        .map_err(|e| report(e, "Failed to load birthdays."))?
        .data_or_default();

    if birthdays.is_empty() {
        println!("No birthdays.");
    }
    for b in &birthdays {
        let name = b.user.as_ref().map(|u| u.display_name()).unwrap_or("Parishioner");
        let date = b.date_of_birth.as_deref().map(format_date).unwrap_or_default();
        println!("{:<28} {:<14} Feast: {}", name, date, format_optional(b.feast_name.as_deref(), "-"));
    }
    Ok(())
}

async fn profile(gateway: &Gateway) -> Result<()> {
    let service = gateway.profile();
    let (user, parish) = futures::join!(service.profile(), service.my_parish_profile());

    let user = user.map_err(|e| report(e, "Failed to load profile."))?;
    println!("[{}] {}", user.initials(), user.display_name());
    println!("Email:  {}", format_optional(user.email.as_deref(), "-"));
    println!("Mobile: {}", format_optional(user.mobile_number.as_deref(), "N/A"));

    // A missing parish profile is normal for new accounts
    match parish.map(|resp| resp.into_data()) {
        Ok(Ok(parish)) => {
            println!("\nParish profile");
            println!("  Street:        {}", format_optional(parish.street_name.as_deref(), "-"));
            println!(
                "  Date of birth: {}",
                parish.date_of_birth.as_deref().map(format_date).unwrap_or_else(|| "-".to_string())
            );
            println!("  Feast:         {}", format_optional(parish.feast_name.as_deref(), "-"));
        }
        Ok(Err(_)) => println!("\nNo parish profile yet."),
        Err(e) => return Err(report(e, "Failed to load parish profile.")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;
    use crate::Cli;

    fn parse(line: &str) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("parish").chain(line.split_whitespace()))
            .map(|cli| cli.command)
    }

    fn item(id: i64, stock: i64, available: bool) -> HolyItem {
        HolyItem {
            id,
            item_name: "Rosary".to_string(),
            stock,
            available,
            availability_date: None,
            description: None,
            created_at: None,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("items").unwrap(), Command::Items);
        assert_eq!(parse("logout").unwrap(), Command::Logout);
        assert_eq!(
            parse("login 9876543210").unwrap(),
            Command::Login { mobile_number: Some("9876543210".to_string()) }
        );
        assert_eq!(parse("login").unwrap(), Command::Login { mobile_number: None });
    }

    #[test]
    fn test_parse_order() {
        assert_eq!(parse("order 7 2").unwrap(), Command::Order { item_id: 7, quantity: 2 });
        assert!(parse("order 7").is_err());
        assert!(parse("order x 2").is_err());
        assert!(parse("order 7 0").is_err());
    }

    #[test]
    fn test_parse_request_certificate() {
        assert_eq!(
            parse("request-certificate first_communion for school").unwrap(),
            Command::RequestCertificate {
                kind: CertificateType::FirstCommunion,
                remarks: vec!["for".to_string(), "school".to_string()],
            }
        );
        assert!(parse("request-certificate ordination").is_err());
    }

    #[test]
    fn test_parse_intend_collects_description() {
        let Command::Intend { intention_for, date, description } =
            parse("intend Grandma 2025-11-02 repose of her soul").unwrap()
        else {
            panic!("expected intend");
        };
        assert_eq!(intention_for, "Grandma");
        assert_eq!(date, "2025-11-02");
        assert_eq!(description.join(" "), "repose of her soul");
        assert!(parse("intend Grandma 2025-11-02").is_err());
    }

    #[test]
    fn test_parse_birthdays_month() {
        assert_eq!(parse("birthdays").unwrap(), Command::Birthdays { month: None });
        assert_eq!(parse("birthdays 7").unwrap(), Command::Birthdays { month: Some(7) });
        assert!(parse("birthdays 13").is_err());
        assert!(parse("birthdays 0").is_err());
    }

    #[test]
    fn test_parse_signup() {
        assert_eq!(
            parse("signup --name Maria --mobile 9876543210 --email maria@example.com").unwrap(),
            Command::Signup {
                name: "Maria".to_string(),
                mobile: "9876543210".to_string(),
                email: "maria@example.com".to_string(),
            }
        );
        assert!(parse("signup --name Maria").is_err());
    }

    #[test]
    fn test_parse_add_item() {
        assert_eq!(
            parse("add-item Candle 40 --unavailable --available-from 2025-12-01").unwrap(),
            Command::AddItem {
                name: "Candle".to_string(),
                stock: 40,
                unavailable: true,
                available_from: Some("2025-12-01".to_string()),
                description: None,
            }
        );
        assert!(parse("add-item Candle -3").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse("pray").is_err());
    }

    #[test]
    fn test_check_order_uses_inventory() {
        let items = vec![item(1, 4, true), item(2, 0, false)];
        assert!(check_order(&items, 1, 4).is_ok());
        assert!(check_order(&items, 1, 5).unwrap_err().to_string().contains("Only 4"));
        assert!(check_order(&items, 2, 1).unwrap_err().to_string().contains("out of stock"));
        assert!(check_order(&items, 9, 1).unwrap_err().to_string().contains("No holy item"));
    }

    #[test]
    fn test_report_unauthorized_hint() {
        let err = ApiError::Unauthorized { body: String::new(), message: None };
        assert!(report(err, "x").to_string().contains("parish login"));
    }

    #[test]
    fn test_report_prefers_backend_message() {
        let err = ApiError::InvalidResponse("Item out of stock".to_string());
        assert_eq!(report(err, "Failed").to_string(), "Item out of stock");

        let err = ApiError::InvalidRequest("Please fill all fields".to_string());
        assert_eq!(report(err, "Signup failed.").to_string(), "Please fill all fields");
    }
}
