//! Per-stage default task templates.

use crate::model::task::{Stage, Task, TaskStatus};

/// Name and description of one template task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    pub name: &'static str,
    pub description: &'static str,
}

const fn template(name: &'static str, description: &'static str) -> TaskTemplate {
    TaskTemplate { name, description }
}

const BID_KICKOFF: &[TaskTemplate] = &[
    template("Anbudsstartmöte", "Håll kickoff-möte för anbudsarbetet"),
    template("Förbered presentation projektråd", "Skapa presentation för projektrådet"),
    template("Avstämningsmöte", "Avstämningsmöte med projektgruppen"),
    template("Uppföljningsmöte 1", "Första uppföljningsmötet"),
    template("Uppföljningsmöte 2", "Andra uppföljningsmötet"),
    template("Strategi för att vinna anbudet", "Utveckla en strategi för att vinna anbudet"),
    template("Slutmöte anbud", "Avslutande möte för anbudsfasen"),
];

const PROJECT_COUNCIL: &[TaskTemplate] = &[template(
    "Presentation av anbudet",
    "Presentera anbudet för projektrådet",
)];

const ESTIMATING: &[TaskTemplate] = &[
    template("Förberedelser", "Förbered underlag för kalkylarbete"),
    template("Förfrågningar", "Skicka förfrågningar till underleverantörer"),
    template("Kalkylering", "Genomför kalkylering av projektet"),
    template("Kalkylsammanställning", "Sammanställ kalkylresultaten"),
];

const BID_REVIEW: &[TaskTemplate] = &[
    template("Förberedelser", "Förbered anbudsgenomgång"),
    template("Förberedelser över 400MSEK", "Särskilda förberedelser för stora projekt"),
    template("Anbudssammanställning", "Sammanställ anbudet"),
    template("Försäkringar och säkerhet", "Säkerställ försäkringar och säkerheter"),
];

const BID_COUNCIL: &[TaskTemplate] = &[template("Anbudsråd", "Möte med anbudsrådet")];

const BID_SUBMISSION: &[TaskTemplate] = &[
    template(
        "Lämna anbud enligt AF",
        "Lämna in anbudet enligt administrativa föreskrifter",
    ),
    template(
        "Anbudskompletteringar (AK)",
        "Hantera eventuella kompletteringar till anbudet",
    ),
];

const BID_DECISION: &[TaskTemplate] = &[
    template("Inför kontraktskrivning", "Förbered för kontraktskrivning"),
    template("Kontraktsgenomgång", "Genomgång av kontraktet"),
];

const SIGNED_CONTRACT: &[TaskTemplate] = &[
    template("Signerat kontrakt", "Bekräfta signerat kontrakt"),
    template(
        "Säkerställ kommunikation till marknaden",
        "Kommunicera med relevanta marknadsaktörer",
    ),
    template("Arkivera signerat kontrakt", "Arkivera det signerade kontraktet"),
];

const HANDOVER: &[TaskTemplate] = &[
    template("Projektanmälan", "Anmäl projektet enligt rutiner"),
    template(
        "Uppdatera anbudskalkyl till kontraktskalkyl",
        "Uppdatera kalkylen efter kontraktsskrivning",
    ),
    template(
        "Förberedelser inför projektstartmöte",
        "Förbered för projektstartmöte",
    ),
];

/// Template tasks of `stage`, in display order.
pub fn templates_for(stage: Stage) -> &'static [TaskTemplate] {
    match stage {
        Stage::BidKickoff => BID_KICKOFF,
        Stage::ProjectCouncil => PROJECT_COUNCIL,
        Stage::Estimating => ESTIMATING,
        Stage::BidReview => BID_REVIEW,
        Stage::BidCouncil => BID_COUNCIL,
        Stage::BidSubmission => BID_SUBMISSION,
        Stage::BidDecision => BID_DECISION,
        Stage::SignedContract => SIGNED_CONTRACT,
        Stage::Handover => HANDOVER,
    }
}

/// Number of template tasks across all nine stages.
pub fn template_count() -> usize {
    Stage::ALL
        .into_iter()
        .map(|stage| templates_for(stage).len())
        .sum()
}

/// Instantiates the templates of `stage` with `status`.
///
/// Ids are `{stage}-{n}` with 1-based `n`, so they are unique within one
/// project but repeat across projects.
pub fn tasks_for_stage(stage: Stage, status: TaskStatus) -> Vec<Task> {
    templates_for(stage)
        .iter()
        .enumerate()
        .map(|(index, template)| {
            Task::new(
                format!("{}-{}", stage.as_str(), index + 1),
                template.name,
                template.description,
                stage,
                status,
            )
        })
        .collect()
}

/// Full nine-stage task list with every stage at `status`.
pub fn full_task_set(status: TaskStatus) -> Vec<Task> {
    Stage::ALL
        .into_iter()
        .flat_map(|stage| tasks_for_stage(stage, status))
        .collect()
}
