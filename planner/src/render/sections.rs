// Sección 1: metadatos del programa, cuestionario según el modo (base o
// derivado), proyección de matrícula, milestones, revisiones y equipo.

use crate::algorithm::projection::{project_from_inputs, EnrolmentProjection, PROGRAM_YEARS};
use crate::models::{BaseProgramInfo, DerivedProgramInfo, EnrolmentInputs, Program, ProgramInfo};

use super::layout::PageWriter;
use super::text::format_credits;

pub fn write_metadata(w: &mut PageWriter, program: &Program, info: &ProgramInfo) {
    let name = if program.name.trim().is_empty() { "Untitled program" } else { program.name.as_str() };
    let subtitle = format!("Major Curriculum Modification - Version {}", info.version().max(1));
    w.title(name, Some(&subtitle));

    w.heading("Program Information");
    w.key_value("Program type", program.program_type.label());
    w.key_value("Faculty", &program.faculty);
    w.key_value("Program lead", &program.lead);
    w.key_value("Status", program.status.label());
    w.key_value("Total credits", &format_credits(program.total_credits()));
    w.key_value("Terms / blocks", &program.semesters.len().to_string());
    w.key_value("Description", &program.description);

    match info {
        ProgramInfo::Base(base) => write_base_details(w, base),
        ProgramInfo::Derived(derived) => write_derived_details(w, program, derived),
    }

    write_enrolment(w, info.enrolment());
    write_milestones(w, program);

    if !program.reviews.is_empty() {
        w.heading("Reviews");
        for r in &program.reviews {
            let date = r.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
            let who = if date.is_empty() { r.reviewer.clone() } else { format!("{} ({})", r.reviewer, date) };
            w.key_value(&who, &r.comment);
        }
    }

    if !program.faculty_members.is_empty() {
        w.heading("Faculty Members");
        for m in &program.faculty_members {
            let detail = [m.role.as_str(), m.email.as_str()]
                .iter()
                .filter(|s| !s.trim().is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            w.key_value(&m.name, &detail);
        }
    }
}

fn write_base_details(w: &mut PageWriter, info: &BaseProgramInfo) {
    w.heading("Program Details");
    w.key_value("Rationale", &info.rationale);
    if info.learning_outcomes.is_empty() {
        w.key_value("Learning outcomes", "");
    } else {
        w.subheading("Learning outcomes");
        for outcome in &info.learning_outcomes {
            w.bullet(outcome);
        }
    }
    w.key_value("Admission requirements", &info.admission_requirements);
    w.key_value("Delivery mode", &info.delivery_mode);
    w.key_value("Resources", &info.resources);
    w.key_value("Consultation", &info.consultation);
}

fn write_derived_details(w: &mut PageWriter, program: &Program, info: &DerivedProgramInfo) {
    w.heading("Modification Details");
    let parent = program.parent.as_ref().map(|p| {
        if p.parent_name.is_empty() { p.parent_id.clone() } else { p.parent_name.clone() }
    });
    w.key_value("Parent program", parent.as_deref().unwrap_or(""));
    w.key_value("Summary of changes", &info.modification_summary);
    w.key_value("Rationale", &info.rationale);
    w.key_value("Impact on students", &info.student_impact);
    w.key_value("Transition plan", &info.transition_plan);
    w.key_value("Consultation", &info.consultation);
    w.key_value("Locked core courses", &program.locked_core_codes().join(", "));
}

pub fn projection_table_rows(p: &EnrolmentProjection) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(PROGRAM_YEARS + 2);
    let mut header = vec!["Year of program".to_string()];
    header.extend(p.year_labels.iter().cloned());
    rows.push(header);

    for (r, cells) in p.rows.iter().enumerate() {
        let mut row = vec![format!("Year {}", r + 1)];
        row.extend(cells.iter().map(|c| c.map(|v| v.to_string()).unwrap_or_default()));
        rows.push(row);
    }

    let mut totals = vec!["Total".to_string()];
    totals.extend(p.totals.iter().map(u64::to_string));
    rows.push(totals);
    rows
}

fn write_enrolment(w: &mut PageWriter, inputs: &EnrolmentInputs) {
    let projection = project_from_inputs(inputs);
    w.heading("Enrolment Projection");
    w.key_value("Starting year", &projection.year_labels[0]);
    w.key_value("First-year intake", &format_credits(inputs.first_year_intake));
    w.key_value("Intake growth", &format!("{}%", inputs.intake_growth_pct));
    w.key_value("Retention loss", &format!("{}%", inputs.retention_loss_pct));
    w.spacer(2.0);

    let first_col = 32.0;
    let other = (w.content_width() - first_col) / projection.year_labels.len() as f32;
    let mut widths = vec![first_col];
    widths.extend(std::iter::repeat(other).take(projection.year_labels.len()));
    w.table(&projection_table_rows(&projection), &widths);
}

fn write_milestones(w: &mut PageWriter, program: &Program) {
    w.heading("Approval Milestones");
    if program.milestones.is_empty() {
        w.paragraph("No milestones defined.");
        return;
    }
    for m in &program.milestones {
        let mark = if m.completed { "[x]" } else { "[ ]" };
        let line = match (m.completed, m.completed_on) {
            (true, Some(d)) => format!("{} {} (completed {})", mark, m.name, d.format("%Y-%m-%d")),
            _ => format!("{} {}", mark, m.name),
        };
        w.paragraph(&line);
    }
}
