pub mod mails;
pub mod sendmail;

#[cfg(test)]
pub mod fake;
