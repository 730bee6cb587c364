use ammonia::clean_text;
use chrono::{Datelike, Utc};
use lettre::{message::Mailbox, Address};

use super::sendmail::{EmailAttachment, OutboundEmail};
use crate::models::eoimodel::{Party, SubmissionRequest};

const EOI_TEMPLATE: &str = include_str!("templates/EOI-submission.html");
const PARTY2_TEMPLATE: &str = include_str!("templates/EOI-party2.html");

pub fn eoi_subject(submission: &SubmissionRequest) -> String {
    format!(
        "New EOI Submission - {} | {}",
        submission.party1.name, submission.unit.unit_type
    )
}

/// Renders the notification email with the current year in the footer.
pub fn render_eoi_email(submission: &SubmissionRequest) -> String {
    render_eoi_email_for_year(submission, Utc::now().year())
}

/// Form values are escaped with `clean_text`, never stripped. Emails also land inside `href`.
pub fn render_eoi_email_for_year(submission: &SubmissionRequest, year: i32) -> String {
    let party2_section = submission
        .party2
        .as_ref()
        .map(render_party2)
        .unwrap_or_default();

    let placeholders = vec![
        ("submitted_at", clean_text(&submission.submitted_at)),
        ("source", clean_text(&submission.source)),
        ("name1", clean_text(&submission.party1.name)),
        ("mobile1", clean_text(&submission.party1.mobile)),
        ("email1", clean_text(&submission.party1.email)),
        ("nationality1", clean_text(&submission.party1.nationality)),
        ("passport_number1", clean_text(&submission.party1.passport_number)),
        ("party2_section", party2_section),
        ("unit_type", clean_text(&submission.unit.unit_type)),
        ("unit_number", clean_text(&submission.unit.unit_number)),
        ("down_payment", clean_text(&submission.unit.down_payment)),
        ("preferred_unit", clean_text(&submission.unit.preferred_unit)),
        ("agency_name", clean_text(&submission.agency.agency_name)),
        ("agent_name", clean_text(&submission.agency.agent_name)),
        ("agent_mobile", clean_text(&submission.agency.agent_mobile)),
        ("sales_manager", clean_text(&submission.sales_manager)),
        ("year", year.to_string()),
    ];

    fill_template(EOI_TEMPLATE, &placeholders)
}

fn render_party2(party: &Party) -> String {
    let placeholders = vec![
        ("name2", clean_text(&party.name)),
        ("mobile2", clean_text(&party.mobile)),
        ("email2", clean_text(&party.email)),
        ("nationality2", clean_text(&party.nationality)),
        ("passport_number2", clean_text(&party.passport_number)),
    ];

    fill_template(PARTY2_TEMPLATE, &placeholders)
}

/// Single pass over `{{key}}` markers so substituted values are never re-scanned.
fn fill_template(template: &str, placeholders: &[(&str, String)]) -> String {
    let mut rendered = String::with_capacity(template.len() + 1024);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            rendered.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let key = &after_open[..end];
        match placeholders.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => rendered.push_str(value),
            None => rendered.push_str(&rest[start..start + end + 4]),
        }
        rest = &after_open[end + 2..];
    }

    rendered.push_str(rest);
    rendered
}

/// Composes the notification for the sales inbox. Reply-To points at party 1 when their
/// address is usable; a bad address only drops the header.
pub fn compose_eoi_email(
    submission: &SubmissionRequest,
    html_body: String,
    from: &Mailbox,
    to: &[Mailbox],
) -> OutboundEmail {
    let attachments = submission
        .passports()
        .map(|passport| EmailAttachment {
            filename: passport.filename.clone(),
            content_type: passport.mime_type(),
            content: passport.content.to_vec(),
        })
        .collect();

    OutboundEmail {
        from: from.clone(),
        to: to.to_vec(),
        reply_to: reply_to_for(&submission.party1),
        subject: eoi_subject(submission),
        html_body,
        attachments,
    }
}

fn reply_to_for(party: &Party) -> Option<Mailbox> {
    let email = party.email.trim();
    if !validator::validate_email(email) {
        return None;
    }

    let address = email.parse::<Address>().ok()?;
    let name = party.name.trim();
    Some(Mailbox::new(
        (!name.is_empty()).then(|| name.to_string()),
        address,
    ))
}
