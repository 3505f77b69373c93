//! MIME message construction

use crate::types::{AlertThreshold, MailMessage, UsageSummary};

/// Subject line of every disk alert
pub const DISK_ALERT_SUBJECT: &str = "Disk Threshold Alert";

/// Render a message as raw MIME text.
///
/// Header order is fixed: MIME-Version, Content-Type, From, To, Subject.
/// Recipients are joined with `;`. Every line ends with CRLF, including lines
/// inside the body; SMTP servers reject bare LF.
pub fn build_message(msg: &MailMessage) -> String {
    let mut out = String::with_capacity(160 + msg.body_html.len());
    out.push_str("MIME-Version: 1.0\r\n");
    out.push_str("Content-Type: text/html; charset=\"UTF-8\"\r\n");
    out.push_str(&format!("From: {}\r\n", msg.sender));
    out.push_str(&format!("To: {}\r\n", msg.recipients.join(";")));
    out.push_str(&format!("Subject: {}\r\n", msg.subject));
    out.push_str("\r\n");
    push_crlf(&mut out, &msg.body_html);
    out.push_str("\r\n");
    out
}

/// Append `text`, turning every lone `\n` into `\r\n`
fn push_crlf(out: &mut String, text: &str) {
    let mut prev = '\0';
    for c in text.chars() {
        if c == '\n' && prev != '\r' {
            out.push('\r');
        }
        out.push(c);
        prev = c;
    }
}

/// HTML body naming the threshold and embedding the usage report.
///
/// `exceeded` is false only for forced alerts, which must not claim the
/// threshold was crossed.
pub fn disk_alert_body(
    threshold: AlertThreshold,
    summary: &UsageSummary,
    exceeded: bool,
) -> String {
    let verdict = if exceeded { "exceeds" } else { "is within" };
    format!(
        "<p>Disk usage on <b>{}</b> {} the {}% threshold.</p>\n<pre>{}</pre>",
        summary.path.display(),
        verdict,
        threshold,
        summary.render()
    )
}

/// Assemble the alert email for a checked summary
pub fn disk_alert_message(
    sender: &str,
    recipients: &[String],
    threshold: AlertThreshold,
    summary: &UsageSummary,
    exceeded: bool,
) -> MailMessage {
    MailMessage {
        sender: sender.to_string(),
        recipients: recipients.to_vec(),
        subject: DISK_ALERT_SUBJECT.to_string(),
        body_html: disk_alert_body(threshold, summary, exceeded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawUsage;

    fn sample() -> MailMessage {
        MailMessage {
            sender: "a@b.com".to_string(),
            recipients: vec!["c@d.com".to_string(), "e@f.com".to_string()],
            subject: "S".to_string(),
            body_html: "B".to_string(),
        }
    }

    #[test]
    fn test_headers_present() {
        let raw = build_message(&sample());
        assert!(raw.contains("From: a@b.com\r\n"));
        assert!(raw.contains("To: c@d.com;e@f.com\r\n"));
        assert!(raw.contains("Subject: S\r\n"));
        assert!(raw.ends_with("\r\nB\r\n"));
    }

    #[test]
    fn test_header_order() {
        let raw = build_message(&sample());
        let mime = raw.find("MIME-Version: 1.0\r\n").unwrap();
        let content_type = raw.find("Content-Type: text/html; charset=\"UTF-8\"\r\n").unwrap();
        let from = raw.find("From:").unwrap();
        let to = raw.find("To:").unwrap();
        let subject = raw.find("Subject:").unwrap();
        let blank = raw.find("\r\n\r\n").unwrap();

        assert_eq!(mime, 0);
        assert!(mime < content_type);
        assert!(content_type < from);
        assert!(from < to);
        assert!(to < subject);
        assert!(subject < blank);
    }

    #[test]
    fn test_exact_layout() {
        let raw = build_message(&sample());
        assert_eq!(
            raw,
            "MIME-Version: 1.0\r\n\
             Content-Type: text/html; charset=\"UTF-8\"\r\n\
             From: a@b.com\r\n\
             To: c@d.com;e@f.com\r\n\
             Subject: S\r\n\
             \r\n\
             B\r\n"
        );
    }

    #[test]
    fn test_single_recipient_has_no_separator() {
        let mut msg = sample();
        msg.recipients.truncate(1);
        assert!(build_message(&msg).contains("To: c@d.com\r\n"));
    }

    fn summary(used_percent: f64) -> UsageSummary {
        UsageSummary::new(
            "/data",
            RawUsage {
                total_bytes: 100_000,
                used_bytes: 95_000,
                free_bytes: 5_000,
                used_percent,
            },
        )
    }

    fn bare_lf_count(raw: &str) -> usize {
        raw.as_bytes()
            .iter()
            .enumerate()
            .filter(|&(i, &b)| b == b'\n' && (i == 0 || raw.as_bytes()[i - 1] != b'\r'))
            .count()
    }

    #[test]
    fn test_disk_alert_message() {
        let summary = summary(95.0);
        let threshold = AlertThreshold::new(90.0).unwrap();
        let msg = disk_alert_message(
            "ops@example.com",
            &["root@example.com".to_string()],
            threshold,
            &summary,
            true,
        );

        assert_eq!(msg.subject, DISK_ALERT_SUBJECT);
        assert_eq!(msg.sender, "ops@example.com");
        assert_eq!(msg.recipients, vec!["root@example.com".to_string()]);
        assert!(msg.body_html.contains("exceeds the 90% threshold"));
        assert!(msg.body_html.contains(&summary.render()));
    }

    #[test]
    fn test_forced_alert_body_does_not_claim_exceeded() {
        let threshold = AlertThreshold::new(90.0).unwrap();
        let body = disk_alert_body(threshold, &summary(10.0), false);
        assert!(body.contains("is within the 90% threshold"));
        assert!(!body.contains("exceeds"));
    }

    #[test]
    fn test_alert_has_no_bare_lf() {
        let threshold = AlertThreshold::new(90.0).unwrap();
        let recipients = vec!["c@d.com".to_string()];
        let msg = disk_alert_message("a@b.com", &recipients, threshold, &summary(95.0), true);
        let raw = build_message(&msg);

        assert!(msg.body_html.contains('\n'));
        assert_eq!(bare_lf_count(&raw), 0, "raw message: {:?}", raw);
        assert!(raw.contains("<pre>Path: /data\r\n"));
    }

    #[test]
    fn test_body_crlf_is_not_doubled() {
        let mut msg = sample();
        msg.body_html = "one\r\ntwo\nthree".to_string();
        let raw = build_message(&msg);
        assert!(raw.ends_with("\r\none\r\ntwo\r\nthree\r\n"));
        assert!(!raw.contains("\r\r"));
    }
}
