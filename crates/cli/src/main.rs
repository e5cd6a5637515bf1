//! Admin console for the clinica backend.
//!
//! Operates on the same snapshot file as the REST server, through the
//! same core services, so every integrity rule applies here too.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use api_shared::dto::{
    CreateDoctorReq, CreatePatientReq, CreateSpecialtyReq, DeleteRes, DoctorFilter, PatientFilter,
    RecordId, SpecialtyFilter,
};
use clinica_core::{ClinicResult, CoreConfig, Services, Store};

#[derive(Parser)]
#[command(name = "clinica")]
#[command(about = "clinica clinic-management admin console")]
struct Cli {
    /// Snapshot file (defaults to CLINICA_DATA_FILE or
    /// clinica-data/clinic.json)
    #[arg(long)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List specialties
    SpecialtyList {
        /// Substring to search names for
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a specialty
    SpecialtyAdd {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List patients
    PatientList {
        /// Substring to search national ids and names for
        #[arg(long)]
        search: Option<String>,
        /// Only active (true) or inactive (false) patients
        #[arg(long)]
        active: Option<bool>,
    },
    /// Register a patient
    PatientAdd {
        national_id: String,
        first_name: String,
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        birth_date: NaiveDate,
        /// Gender code: M, F, O or N
        gender: String,
        /// Blood type code, e.g. O+
        blood_type: String,
        email: String,
        phone: String,
        address: String,
    },
    /// List doctors
    DoctorList {
        #[arg(long)]
        specialty_id: Option<RecordId>,
    },
    /// Register a doctor
    DoctorAdd {
        national_id: String,
        first_name: String,
        last_name: String,
        /// Gender code: M, F, O or N
        gender: String,
        email: String,
        phone: String,
        specialty_id: RecordId,
    },
    /// Delete any record by entity and id, honouring the deletion
    /// policies (protect / cascade / set-null)
    Delete {
        /// One of: specialty, patient, doctor, insurance-policy,
        /// schedule-slot, appointment, consultation, treatment,
        /// medication, prescription, history-entry
        entity: String,
        id: RecordId,
    },
}

fn delete_by_name(services: &Services, entity: &str, id: RecordId) -> Option<ClinicResult<DeleteRes>> {
    let outcome = match entity {
        "specialty" => services.specialties.delete(id),
        "patient" => services.patients.delete(id),
        "doctor" => services.doctors.delete(id),
        "insurance-policy" => services.insurance.delete(id),
        "schedule-slot" => services.schedules.delete(id),
        "appointment" => services.appointments.delete(id),
        "consultation" => services.consultations.delete(id),
        "treatment" => services.treatments.delete(id),
        "medication" => services.medications.delete(id),
        "prescription" => services.prescriptions.delete(id),
        "history-entry" => services.history.delete(id),
        _ => return None,
    };
    Some(outcome)
}

fn print_delete_outcome(outcome: DeleteRes) {
    for row in &outcome.removed {
        println!("removed {} {}", row.entity, row.id);
    }
    for link in &outcome.cleared {
        println!("cleared {} on {} {}", link.field, link.entity, link.id);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_file = cli
        .data_file
        .or_else(|| std::env::var("CLINICA_DATA_FILE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("clinica-data/clinic.json"));
    let store = Arc::new(Store::open(&CoreConfig::new(data_file))?);
    let services = Services::new(store);

    match cli.command {
        Commands::SpecialtyList { search } => {
            let records = services.specialties.list(&SpecialtyFilter { search });
            if records.is_empty() {
                println!("No specialties found.");
            }
            for record in records {
                println!(
                    "ID: {}, Name: {}, Description: {}",
                    record.id,
                    record.name,
                    record.description.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::SpecialtyAdd { name, description } => {
            match services.specialties.create(CreateSpecialtyReq { name, description }) {
                Ok(record) => println!("Created specialty {} ({})", record.name, record.id),
                Err(e) => eprintln!("Error creating specialty: {e}"),
            }
        }
        Commands::PatientList { search, active } => {
            let records = services.patients.list(&PatientFilter { search, active });
            if records.is_empty() {
                println!("No patients found.");
            }
            for record in records {
                println!(
                    "ID: {}, {}, National id: {}, Blood: {}, Active: {}",
                    record.id, record.full_name, record.national_id, record.blood_type, record.active
                );
            }
        }
        Commands::PatientAdd {
            national_id,
            first_name,
            last_name,
            birth_date,
            gender,
            blood_type,
            email,
            phone,
            address,
        } => {
            let request = CreatePatientReq {
                national_id,
                first_name,
                last_name,
                birth_date,
                gender,
                blood_type,
                email,
                phone,
                address,
                active: None,
            };
            match services.patients.create(request) {
                Ok(record) => println!("Registered patient {} ({})", record.full_name, record.id),
                Err(e) => eprintln!("Error registering patient: {e}"),
            }
        }
        Commands::DoctorList { specialty_id } => {
            let records = services.doctors.list(&DoctorFilter {
                specialty_id,
                ..Default::default()
            });
            if records.is_empty() {
                println!("No doctors found.");
            }
            for record in records {
                println!(
                    "ID: {}, {}, Specialty: {}, Active: {}",
                    record.id, record.display_name, record.specialty_name, record.active
                );
            }
        }
        Commands::DoctorAdd {
            national_id,
            first_name,
            last_name,
            gender,
            email,
            phone,
            specialty_id,
        } => {
            let request = CreateDoctorReq {
                national_id,
                first_name,
                last_name,
                gender,
                email,
                phone,
                active: None,
                specialty_id,
            };
            match services.doctors.create(request) {
                Ok(record) => println!("Registered doctor {} ({})", record.display_name, record.id),
                Err(e) => eprintln!("Error registering doctor: {e}"),
            }
        }
        Commands::Delete { entity, id } => match delete_by_name(&services, &entity, id) {
            None => eprintln!("Unknown entity '{entity}'"),
            Some(Ok(outcome)) => print_delete_outcome(outcome),
            Some(Err(e)) => eprintln!("Error deleting {entity} {id}: {e}"),
        },
    }

    Ok(())
}
