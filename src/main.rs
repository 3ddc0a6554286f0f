use medislot::config::CONFIG;
use medislot::core::forms::{BookingForm, LoginForm, ProfileForm, RegisterForm};
use medislot::core::models::{AppointmentStatus, Role};
use medislot::screens::{self, book, details};
use medislot::{Api, CredentialStore, FileCredentialStore, HttpApi, MediSlotError, MediSlotService, Notifier, Route, TerminalNotifier};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: medislot <command>

  open [path]                                   show a screen (default: your home screen)
  login <email> <password>
  register <name> <email> <password> [--phone <phone>] [--role patient|doctor]
  logout
  slots <doctor_id> <YYYY-MM-DD>                free and booked slots for a doctor
  book <doctor_id> <YYYY-MM-DD> <HH:MM> [reason...]
  cancel <appointment_id>
  show <appointment_id>
  status <appointment_id> <pending|approved|rejected>
  delete <appointment_id>
  profile [--name <name>] [--email <email>] [--phone <phone>]";

enum Command {
    Open(Option<Route>),
    Login(LoginForm),
    Register(RegisterForm),
    Logout,
    Slots { doctor: String, date: String },
    Book(BookingForm),
    Cancel(String),
    Show(String),
    Status(String, AppointmentStatus),
    Delete(String),
    Profile(ProfileForm),
}

impl Command {
    fn parse(args: &[String]) -> Result<Command, String> {
        let (name, rest) = args.split_first().ok_or_else(|| USAGE.to_string())?;
        let take = |n: usize| positional(name, rest, n);

        let command = match name.as_str() {
            "open" => Command::Open(rest.first().map(|path| Route::parse(path))),
            "login" => {
                let args = take(2)?;
                Command::Login(LoginForm {
                    email: args[0].clone(),
                    password: args[1].clone(),
                })
            }
            "register" => {
                let args = take(3)?;
                let flags = parse_flags(&rest[3..])?;
                Command::Register(RegisterForm {
                    name: args[0].clone(),
                    email: args[1].clone(),
                    password: args[2].clone(),
                    phone: flag(&flags, "phone"),
                    role: flags
                        .iter()
                        .find(|(key, _)| key == "role")
                        .map(|(_, value)| Role::from(value.as_str()))
                        .unwrap_or(Role::Patient),
                })
            }
            "logout" => Command::Logout,
            "slots" => {
                let args = take(2)?;
                Command::Slots {
                    doctor: args[0].clone(),
                    date: args[1].clone(),
                }
            }
            "book" => {
                let args = take(3)?;
                Command::Book(BookingForm {
                    doctor: args[0].clone(),
                    date: args[1].clone(),
                    time: args[2].clone(),
                    reason: rest[3..].join(" "),
                })
            }
            "cancel" => Command::Cancel(take(1)?[0].clone()),
            "show" => Command::Show(take(1)?[0].clone()),
            "status" => {
                let args = take(2)?;
                let status = args[1].parse::<AppointmentStatus>().map_err(|e| e.to_string())?;
                Command::Status(args[0].clone(), status)
            }
            "delete" => Command::Delete(take(1)?[0].clone()),
            "profile" => {
                let flags = parse_flags(rest)?;
                Command::Profile(ProfileForm {
                    name: flag(&flags, "name"),
                    email: flag(&flags, "email"),
                    phone: flag(&flags, "phone"),
                })
            }
            "help" | "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("Unknown command `{}`\n\n{}", other, USAGE)),
        };
        Ok(command)
    }
}

fn positional<'a>(name: &str, rest: &'a [String], n: usize) -> Result<&'a [String], String> {
    if rest.len() < n {
        Err(format!("`{}` expects {} argument(s)\n\n{}", name, n, USAGE))
    } else {
        Ok(&rest[..n])
    }
}

/// `--key value` pairs.
fn parse_flags(args: &[String]) -> Result<Vec<(String, String)>, String> {
    let mut flags = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let key = arg
            .strip_prefix("--")
            .ok_or_else(|| format!("Unexpected argument `{}`", arg))?;
        let value = iter.next().ok_or_else(|| format!("`--{}` needs a value", key))?;
        flags.push((key.to_string(), value.clone()));
    }
    Ok(flags)
}

fn flag(flags: &[(String, String)], key: &str) -> String {
    flags
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}

async fn run<A: Api, C: CredentialStore, N: Notifier>(
    service: &mut MediSlotService<A, C, N>,
    command: Command,
) -> Result<String, MediSlotError> {
    match command {
        Command::Open(route) => {
            let route = route.unwrap_or_else(|| service.route());
            service.visit(route).await?;
        }
        Command::Login(form) => {
            let route = service.login(&form).await?;
            service.visit(route).await?;
        }
        Command::Register(form) => {
            let route = service.register(&form).await?;
            service.visit(route).await?;
        }
        Command::Logout => {
            service.logout().await?;
        }
        Command::Slots { doctor, date } => {
            if service.visit(Route::Book).await? == Route::Book {
                return Ok(book::render(service.appointments(), Some(&doctor), Some(&date)));
            }
        }
        Command::Book(form) => {
            service.visit(Route::Book).await?;
            let summary = form
                .validate(&service.appointments().appointments)
                .ok()
                .map(|request| book::render_summary(service.appointments(), &request));
            service.book(&form).await?;
            let grid = book::render(service.appointments(), Some(&form.doctor), Some(&form.date));
            return Ok(format!("{}\n{}", summary.unwrap_or_default(), grid));
        }
        Command::Cancel(id) => {
            service.visit(Route::Appointments).await?;
            service.cancel(&id).await?;
        }
        Command::Show(id) => {
            service.visit(service.route()).await?;
            return Ok(details::render(service.details(&id)?));
        }
        Command::Status(id, status) => {
            service.visit(Route::Doctor).await?;
            service.set_status(&id, status).await?;
        }
        Command::Delete(id) => {
            service.visit(Route::Doctor).await?;
            service.delete(&id).await?;
        }
        Command::Profile(form) => {
            if form != ProfileForm::default() {
                service.save_profile(&form).await?;
            }
            service.visit(Route::Profile).await?;
        }
    }
    Ok(screens::render_current(service))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&CONFIG.log_level))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{}", usage);
            return Ok(ExitCode::from(2));
        }
    };

    debug!("Loaded config: {:?}", *CONFIG);
    info!("Using backend at {}", CONFIG.api_base_url);
    let credentials = FileCredentialStore::new(CONFIG.credentials_path.clone());
    let api = HttpApi::from_config(&CONFIG, credentials.clone())?;
    let mut service = MediSlotService::start(api, credentials, TerminalNotifier::new()).await?;

    match run(&mut service, command).await {
        Ok(screen) => {
            println!("{}", screen);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // The notifier has already reported the failure.
            debug!("Action failed: {:?}", e);
            println!("{}", screens::render_current(&service));
            Ok(ExitCode::FAILURE)
        }
    }
}
