use crate::model::{SubstitutionWithDetails, Teacher, DAYS_PER_WEEK, PERIODS_PER_DAY};
use crate::seed::Seed;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Import d'enseignants depuis CSV: header `id,name[,subjects][,available]`
///
/// `subjects` : liste séparée par `;`. `available` : cases libres au format
/// `jour:période` séparées par `;` (ex. `0:1;0:2;3:8`). Les cases absentes
/// sont indisponibles.
pub fn import_teachers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Teacher>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid teacher row (empty)");
        }
        let mut teacher = Teacher::new(id, name);
        if let Some(subjects) = rec.get(2) {
            teacher = teacher.with_subjects(
                subjects
                    .split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty()),
            );
        }
        if let Some(cells) = rec.get(3) {
            for cell in cells.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                let (day, period) = parse_cell(cell)
                    .with_context(|| format!("invalid availability for teacher {id}"))?;
                teacher.set_available(day, period, true);
            }
        }
        out.push(teacher);
    }
    Ok(out)
}

fn parse_cell(raw: &str) -> anyhow::Result<(u8, u8)> {
    let (day, period) = raw
        .split_once(':')
        .with_context(|| format!("expected day:period, got {raw}"))?;
    let day: u8 = day.trim().parse().context("day")?;
    let period: u8 = period.trim().parse().context("period")?;
    if day >= DAYS_PER_WEEK {
        bail!("day {day} out of range 0..{DAYS_PER_WEEK}");
    }
    if !(1..=PERIODS_PER_DAY).contains(&period) {
        bail!("period {period} out of range 1..={PERIODS_PER_DAY}");
    }
    Ok((day, period))
}

/// Export CSV de la table: header `id,date,period,original_teacher,class,subject,substitute_teacher,status`
pub fn export_details_csv<P: AsRef<Path>>(
    path: P,
    rows: &[SubstitutionWithDetails],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "date",
        "period",
        "original_teacher",
        "class",
        "subject",
        "substitute_teacher",
        "status",
    ])?;
    for row in rows {
        let date = row.date.to_string();
        let period = row.period.to_string();
        let substitute = row
            .substitute_teacher
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or("");
        w.write_record([
            row.id.as_str(),
            date.as_str(),
            period.as_str(),
            row.original_teacher.name.as_str(),
            row.class.name.as_str(),
            row.subject.name.as_str(),
            substitute,
            status_label(row.is_assigned),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON de la table détaillée (écriture atomique).
pub fn export_details_json<P: AsRef<Path>>(
    path: P,
    rows: &[SubstitutionWithDetails],
) -> anyhow::Result<()> {
    write_json_atomic(path.as_ref(), rows)
}

/// Export JSON du jeu de données (jolie mise en forme, écriture atomique).
pub fn export_seed_json<P: AsRef<Path>>(path: P, seed: &Seed) -> anyhow::Result<()> {
    write_json_atomic(path.as_ref(), seed)
}

pub fn status_label(is_assigned: bool) -> &'static str {
    if is_assigned {
        "assigned"
    } else {
        "open"
    }
}

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

