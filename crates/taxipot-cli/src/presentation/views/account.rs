use std::fmt;

use crate::presentation::formatters::{format_departure, headcount, status_label, won};
use crate::presentation::view_models::{
    CurrentPotViewModel, LoginViewModel, LogoutViewModel, PictureUploadedViewModel, PotViewModel,
    ProfileViewModel,
};

pub const NO_CURRENT_POT: &str = "참여 중인 방이 없습니다.";
pub const GUEST_EMAIL: &str = "guest@snu.ac.kr";

pub struct PotView<'a> {
    pot: &'a PotViewModel,
}

impl<'a> PotView<'a> {
    pub fn new(pot: &'a PotViewModel) -> Self {
        Self { pot }
    }
}

impl<'a> fmt::Display for PotView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.pot;
        writeln!(
            f,
            "[#{}] {} → {}  ({})",
            p.room_id,
            p.departure,
            p.destination,
            status_label(p.is_full)
        )?;
        writeln!(f, "  🕒 {}", format_departure(&p.departure_time))?;
        writeln!(
            f,
            "  {}  (min {})",
            headcount(p.current_count, p.max_capacity),
            p.min_capacity
        )?;
        writeln!(f, "  💰 {}", won(p.estimated_fee))?;
        writeln!(f, "  👑 {}", p.host_name)?;
        writeln!(f, "  status: {}", p.status)
    }
}

pub struct CurrentPotView<'a> {
    data: &'a CurrentPotViewModel,
}

impl<'a> CurrentPotView<'a> {
    pub fn new(data: &'a CurrentPotViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for CurrentPotView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.data.pot {
            Some(pot) => write!(f, "{}", PotView::new(pot)),
            None => writeln!(f, "{}", NO_CURRENT_POT),
        }
    }
}

pub struct ProfileView<'a> {
    data: &'a ProfileViewModel,
}

impl<'a> ProfileView<'a> {
    pub fn new(data: &'a ProfileViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for ProfileView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.data;
        writeln!(f, "Nickname: {}", p.nickname)?;
        writeln!(f, "Email:    {}", p.email.as_deref().unwrap_or(GUEST_EMAIL))?;
        if let Some(image) = &p.profile_image {
            writeln!(f, "Picture:  {}", image)?;
        }
        if !p.logged_in {
            writeln!(f, "(not logged in)")?;
        }
        Ok(())
    }
}

pub struct LoginView<'a> {
    data: &'a LoginViewModel,
}

impl<'a> LoginView<'a> {
    pub fn new(data: &'a LoginViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for LoginView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.data {
            LoginViewModel::Redirect { url } => {
                writeln!(f, "Open this URL and log in with your SNU account:")?;
                writeln!(f, "  {}", url)
            }
            LoginViewModel::SignedIn { email } => writeln!(f, "Logged in as {}", email),
        }
    }
}

pub struct LogoutView<'a> {
    data: &'a LogoutViewModel,
}

impl<'a> LogoutView<'a> {
    pub fn new(data: &'a LogoutViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for LogoutView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.data.server_notified {
            writeln!(f, "Server session could not be ended; local credential cleared anyway.")?;
        }
        if self.data.credential_removed {
            writeln!(f, "Logged out.")
        } else {
            writeln!(f, "No stored credential.")
        }
    }
}

pub struct PictureUploadedView<'a> {
    data: &'a PictureUploadedViewModel,
}

impl<'a> PictureUploadedView<'a> {
    pub fn new(data: &'a PictureUploadedViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for PictureUploadedView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Uploaded {} ({} bytes)", self.data.file_name, self.data.bytes)
    }
}
