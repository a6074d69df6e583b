//! Prompt builders for case generation and grading.
//!
//! Prompts are written in French, the language of the training programme.
//! The content rules (no diagnosis, no numeric vital signs) are enforced by
//! wording only; the generated text is not checked.

use clinibot_core::models::answer::AnswerSet;
use clinibot_core::models::case::CaseRequest;

pub const CASE_SYSTEM_PROMPT: &str =
    "Tu es un expert en soins infirmiers et formation clinique.";

pub const EVALUATION_SYSTEM_PROMPT: &str = "Tu es un expert en pédagogie clinique.";

/// Build the user prompt asking for one clinical case.
pub fn build_case_prompt(request: &CaseRequest) -> String {
    format!(
        "Tu es un expert en formation clinique pour étudiants infirmiers.

Génère un cas clinique complet et réaliste dans la spécialité suivante : **{specialty}**.
Le cas doit être de gravité **{severity}**.

Structure attendue (sans mentionner les titres dans le texte final) :
- Présentation du patient
- Contexte d'hospitalisation
- Histoire de la maladie ou situation actuelle
- Observation clinique (sans chiffres ni constantes vitales chiffrées)
- Examens complémentaires éventuels

Le ton doit être professionnel, pédagogique et réaliste.
N'inclus **aucun diagnostic, aucune solution ni interprétation**.
N'ajoute pas de titres ou de sections explicites dans le texte.",
        specialty = request.specialty.label(),
        severity = request.severity.label(),
    )
}

/// Build the grading prompt: the case followed by the student's four answers.
pub fn build_evaluation_prompt(case_text: &str, answers: &AnswerSet) -> String {
    let mut prompt = String::from("Tu es un formateur en soins infirmiers.\nVoici un cas clinique :\n");
    prompt.push_str(case_text.trim_end());
    prompt.push_str("\n\nL'étudiant a répondu :\n");

    for (section, answer) in answers.iter() {
        prompt.push_str(&format!("{} : {}\n", section.label(), answer.trim()));
    }

    prompt.push_str(
        "\nTa mission :
1. Donne la correction attendue pour chaque section.
2. Compare chaque réponse de l'étudiant à la correction.
3. Donne une note /5 pour chaque section.
4. Termine par un résumé global constructif.",
    );
    prompt
}
