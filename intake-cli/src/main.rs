use anyhow::Result;
use colored::*;
use std::io::{self, Write};

use drolean_intake::clients::AnamnesisClient;
use drolean_intake::config::ClientConfig;
use drolean_intake::models::anamnesis::{IntakeField, IntakeRecord};
use drolean_intake::wizard::{
    FieldUpdate, IntakeWizard, SubmissionStatus, WizardError, WizardStep, SUBMIT_ERROR_MESSAGE,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    println!("{}", "🏃 Drolean - Anamnesis atlética".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());

    let config = ClientConfig::from_env()?;
    let client = AnamnesisClient::new(&config)?;
    println!("{} {}", "📡 API:".bright_blue(), client.url());

    let mut wizard = IntakeWizard::new();

    loop {
        let step = wizard.step();
        println!();
        println!(
            "{}",
            format!(
                "📋 PASO {} DE {}: {}",
                step.index() + 1,
                WizardStep::ALL.len(),
                step.title().to_uppercase()
            )
            .bright_green()
            .bold()
        );
        println!("{}", "==================".bright_green());

        fill_step(&mut wizard)?;

        println!();
        if step.is_last() {
            println!("1. 📤 Enviar");
        } else {
            println!("1. ➡️  Siguiente");
        }
        println!("2. ⬅️  Anterior");
        println!("3. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-3): ")?;

        match choice.as_str() {
            "1" if step.is_last() => {
                if !submit(&mut wizard, &client).await? {
                    break;
                }
            }
            "1" => {
                if !wizard.advance() {
                    show_errors(&wizard);
                }
            }
            "2" => wizard.retreat(),
            "3" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

/// Pedir cada campo del paso actual; Enter conserva el valor mostrado
fn fill_step(wizard: &mut IntakeWizard) -> Result<()> {
    for &field in wizard.step().fields() {
        let is_pain_detail = matches!(field, IntakeField::PainLocation | IntakeField::PainType);
        if is_pain_detail && wizard.record().pain_level == 0 {
            continue;
        }

        loop {
            let current = current_value(wizard.record(), field);
            if let Some(error) = wizard.error_for(field) {
                println!("   {}", format!("⚠️ {}", error).bright_yellow());
            }
            let input = prompt(&format!("{} [{}]: ", label(field), current))?;
            if input.is_empty() {
                break;
            }

            match FieldUpdate::parse(field, &input) {
                Ok(update) => {
                    wizard.update_field(update);
                    break;
                }
                Err(WizardError::InvalidInput { message, .. }) => {
                    println!("   {}", format!("❌ {}", message).bright_red());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

/// Enviar la anamnesis. Devuelve `false` si el usuario quiere salir.
async fn submit(wizard: &mut IntakeWizard, client: &AnamnesisClient) -> Result<bool> {
    println!();
    println!("{}", "📤 ENVIANDO ANAMNESIS...".bright_cyan().bold());

    match wizard.submit(client).await {
        Ok(receipt) => {
            println!("{}", "✅ ¡Anamnesis enviada!".bright_green().bold());
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            show_summary(wizard.record());

            let again = prompt("¿Enviar otra respuesta? (s/n): ")?;
            if matches!(again.to_lowercase().as_str(), "s" | "si" | "sí") {
                wizard.reset();
                Ok(true)
            } else {
                println!("{}", "👋 ¡Gracias!".bright_green());
                Ok(false)
            }
        }
        Err(WizardError::InvalidStep(_)) => {
            show_errors(wizard);
            Ok(true)
        }
        Err(WizardError::Submission(e)) => {
            println!("{}", SUBMIT_ERROR_MESSAGE.bright_red().bold());
            println!("{}", format!("   {}", e).bright_red());
            // Los datos se conservan para reintentar
            if matches!(wizard.status(), SubmissionStatus::Error(_)) {
                wizard.dismiss_error();
            }
            Ok(true)
        }
        Err(e) => {
            println!("{}", format!("❌ {}", e).bright_red());
            Ok(true)
        }
    }
}

fn show_errors(wizard: &IntakeWizard) {
    println!("{}", "❌ Revisa los siguientes campos:".bright_red().bold());
    for (field, message) in wizard.errors() {
        println!("   {} {}", format!("{}:", label(*field)).bright_red(), message);
    }
}

fn show_summary(record: &IntakeRecord) {
    println!();
    println!("{}", "🧾 RESUMEN".bright_blue().bold());
    for step in WizardStep::ALL {
        for &field in step.fields() {
            let value = current_value(record, field);
            if !value.is_empty() {
                println!("   {} {}", format!("{}:", label(field)).bright_blue(), value);
            }
        }
    }
}

fn prompt(text: &str) -> Result<String> {
    print!("{}", text.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn label(field: IntakeField) -> &'static str {
    match field {
        IntakeField::Name => "Nombre completo",
        IntakeField::Phone => "Teléfono",
        IntakeField::Email => "Email (opcional)",
        IntakeField::Age => "Edad (16-80)",
        IntakeField::Weight => "Peso kg (40-150)",
        IntakeField::Height => "Altura cm (140-220)",
        IntakeField::Sport => "Deporte",
        IntakeField::Position => "Posición (opcional)",
        IntakeField::Level => "Nivel (Recreativo/Amateur/Élite)",
        IntakeField::Dominance => "Dominancia (Diestro/Zurdo)",
        IntakeField::Goal => "Objetivo principal",
        IntakeField::PainLevel => "Nivel de dolor (0-10)",
        IntakeField::PainLocation => "Ubicación del dolor",
        IntakeField::PainType => "Tipo de dolor (Punzante/Quemante/Opresivo/Sordo/Pulsátil)",
        IntakeField::TrainingFrequency => "Sesiones por semana (0-14)",
        IntakeField::TrainingHours => "Horas por sesión (0.5-5)",
        IntakeField::RecentChanges => "¿Cambios recientes en el entrenamiento? (s/n)",
        IntakeField::Injuries => "Lesiones previas (opcional)",
        IntakeField::SleepHours => "Horas de sueño (3-12)",
        IntakeField::StressLevel => "Nivel de estrés (Bajo/Medio/Alto)",
    }
}

fn current_value(record: &IntakeRecord, field: IntakeField) -> String {
    match field {
        IntakeField::Name => record.name.clone(),
        IntakeField::Phone => record.phone.clone(),
        IntakeField::Email => record.email.clone(),
        IntakeField::Age => record.age.to_string(),
        IntakeField::Weight => record.weight.to_string(),
        IntakeField::Height => record.height.to_string(),
        IntakeField::Sport => record.sport.clone(),
        IntakeField::Position => record.position.clone(),
        IntakeField::Level => record.level.as_str().to_string(),
        IntakeField::Dominance => record.dominance.as_str().to_string(),
        IntakeField::Goal => record.goal.clone(),
        IntakeField::PainLevel => record.pain_level.to_string(),
        IntakeField::PainLocation => record.pain_location.clone(),
        IntakeField::PainType => record
            .pain_type
            .map(|p| p.as_str().to_string())
            .unwrap_or_default(),
        IntakeField::TrainingFrequency => record.training_frequency.to_string(),
        IntakeField::TrainingHours => record.training_hours.to_string(),
        IntakeField::RecentChanges => {
            let answer = if record.recent_changes { "sí" } else { "no" };
            answer.to_string()
        }
        IntakeField::Injuries => record.injuries.clone(),
        IntakeField::SleepHours => record.sleep_hours.to_string(),
        IntakeField::StressLevel => record.stress_level.as_str().to_string(),
    }
}
