#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use substitute_planner::{
    calendar::WeekView,
    io,
    model::{SubstitutionId, SubstitutionWithDetails, TeacherId},
    notification::{AssignmentNotice, NoticeRenderer, TextNotice},
    registry::ListFilter,
    seed::Seed,
    selection::SelectionSession,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification des remplacements (état en mémoire, rien n'est sauvegardé)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Jeu de données JSON ; données de démonstration si absent
    #[arg(long, global = true)]
    seed: Option<String>,

    /// Remplace les enseignants du jeu de données par un CSV
    #[arg(long, global = true)]
    teachers_csv: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les remplacements et optionnellement exporter
    List {
        /// Seulement les remplacements ouverts
        #[arg(long)]
        open_only: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Lister les remplaçants éligibles pour un remplacement
    Eligible {
        #[arg(long)]
        substitution: String,
    },

    /// Afficher la semaine du remplacement avec les disponibilités des candidats
    Week {
        #[arg(long)]
        substitution: String,
        /// liste "id1,id2,..." ; tous les éligibles si absent
        #[arg(long)]
        teachers: Option<String>,
    },

    /// Assigner un remplaçant
    Assign {
        #[arg(long)]
        substitution: String,
        #[arg(long)]
        teacher: String,
    },

    /// Retirer le remplaçant
    Unassign {
        #[arg(long)]
        substitution: String,
    },

    /// Écrire le jeu de données actif en JSON
    ExportSeed {
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let mut seed = match &cli.seed {
        Some(path) => Seed::from_json_file(path)?,
        None => Seed::demo(Utc::now().date_naive())?,
    };
    if let Some(path) = &cli.teachers_csv {
        seed.reference.teachers = io::import_teachers_csv(path)?;
    }

    match cli.cmd {
        Commands::ExportSeed { out } => {
            io::export_seed_json(&out, &seed)?;
            println!("seed written to {out}");
        }
        Commands::List {
            open_only,
            out_json,
            out_csv,
        } => {
            let registry = seed.into_registry()?;
            let filter = ListFilter { open_only };
            let rows = registry.list_with_details(filter)?;
            if let Some(path) = out_json {
                io::export_details_json(path, &rows)?;
            }
            if let Some(path) = out_csv {
                io::export_details_csv(path, &rows)?;
            }
            for row in &rows {
                print_row(row);
            }
            println!("{} substitutions found", rows.len());
        }
        Commands::Eligible { substitution } => {
            let registry = seed.into_registry()?;
            let sid = SubstitutionId::new(substitution);
            for teacher in registry.eligible_for(&sid)? {
                println!(
                    "{} | {} | {}",
                    teacher.id,
                    teacher.name,
                    teacher.subjects.join(", ")
                );
            }
        }
        Commands::Week {
            substitution,
            teachers,
        } => {
            let sid = SubstitutionId::new(substitution);
            let lessons = {
                let record = seed
                    .substitutions
                    .iter()
                    .find(|s| s.id == sid)
                    .with_context(|| format!("unknown substitution: {sid}"))?;
                seed.lessons_for(&record.class_id).to_vec()
            };
            let registry = seed.into_registry()?;
            let mut session = SelectionSession::new();
            session.open(&registry, &sid)?;
            match teachers {
                Some(list) => {
                    let mut seen = Vec::new();
                    for id in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        if seen.contains(&id) {
                            continue;
                        }
                        seen.push(id);
                        let teacher = registry
                            .reference()
                            .teacher(&TeacherId::new(id))
                            .with_context(|| format!("unknown teacher: {id}"))?;
                        if !session.toggle(teacher) {
                            eprintln!(
                                "teacher {id} is not eligible for substitution {sid}, skipped"
                            );
                        }
                    }
                }
                None => {
                    for teacher in registry.eligible_for(&sid)? {
                        session.toggle(teacher);
                    }
                }
            }
            let details = registry.details(&sid)?;
            let overlay = session.selected_teachers(registry.reference());
            let view = WeekView::build(&details, &overlay, &lessons)?;
            print_week(&view, &details);
        }
        Commands::Assign {
            substitution,
            teacher,
        } => {
            let mut registry = seed.into_registry()?;
            let sid = SubstitutionId::new(substitution);
            let tid = TeacherId::new(teacher);
            let before = registry.details(&sid)?;
            let mut session = SelectionSession::new();
            session.open(&registry, &sid)?;
            let candidate = registry
                .reference()
                .teacher(&tid)
                .with_context(|| format!("unknown teacher: {tid}"))?
                .clone();
            session.toggle(&candidate);
            session.commit(&mut registry, &sid, &tid)?;
            announce(&AssignmentNotice::assigned(&before, &candidate));
            print_row(&registry.details(&sid)?);
        }
        Commands::Unassign { substitution } => {
            let mut registry = seed.into_registry()?;
            let sid = SubstitutionId::new(substitution);
            let before = registry.details(&sid)?;
            let mut session = SelectionSession::new();
            session.open(&registry, &sid)?;
            session.release(&mut registry, &sid)?;
            if let Some(notice) = AssignmentNotice::unassigned(&before) {
                announce(&notice);
            }
            print_row(&registry.details(&sid)?);
        }
    }

    Ok(())
}

fn announce(notice: &AssignmentNotice) {
    println!("{}", TextNotice.render(notice));
}

fn print_row(row: &SubstitutionWithDetails) {
    let substitute = row
        .substitute_teacher
        .as_ref()
        .map(|t| t.name.as_str())
        .unwrap_or("-");
    println!(
        "{} | {} | Period {} | {} | {} | {} | {} | {}",
        row.id,
        row.date,
        row.period,
        row.original_teacher.name,
        row.class.name,
        row.subject.name,
        substitute,
        io::status_label(row.is_assigned)
    );
}

fn print_week(view: &WeekView, details: &SubstitutionWithDetails) {
    const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
    println!(
        "Week of {} | {} - {} | Period {}",
        view.monday, details.class.name, details.subject.name, details.period
    );
    for cell in &view.cells {
        let marker = if cell.is_substitution { "*" } else { " " };
        let lesson = cell.lesson.as_deref().unwrap_or("");
        let available: Vec<&str> = cell.available.iter().map(|id| id.as_str()).collect();
        println!(
            "{marker} {} {} P{} | {:<20} | {}",
            WEEKDAYS[usize::from(cell.day)],
            cell.date,
            cell.period,
            lesson,
            available.join(",")
        );
    }
}
