pub(crate) const MY_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_4) AppleWebKit/537.36 (KHTML, \
like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// The site that every endpoint below is relative to.
pub(crate) const DEFAULT_BASE_URL: &str = "https://gymbox.legendonlineservices.co.uk/enterprise/";

// Endpoints, relative to the base URL. The casing is what the site expects.
pub(crate) const LOGIN: &str = "account/login";
pub(crate) const LOGOUT: &str = "Account/Logout";
pub(crate) const TIMETABLE: &str = "BookingsCentre/MemberTimetable";
pub(crate) const ADD_BOOKING: &str = "BookingsCentre/AddBooking";
pub(crate) const ACTIVE_NOTICES: &str = "notices/activenotices";
pub(crate) const FACILITIES: &str = "mobile/getfacilities";
pub(crate) const BASKET: &str = "Basket/";
pub(crate) const BASKET_PAY: &str = "Basket/Pay";
pub(crate) const PAYMENT_CONFIRMED: &str = "basket/paymentconfirmed";

/// The only cookies the site needs to recognize a session.
pub(crate) const SESSION_COOKIES: [&str; 4] = [
    "ASP.NET_SessionId",
    "LegendOnlineAffinity",
    "Responsive",
    "APP_LGD_COOKIE_TEST",
];

/// Always sent, regardless of what the server issued.
pub(crate) const COOKIE_TEST_FLAG: &str = "APP_LGD_COOKIE_TEST=true";

/// Present somewhere in the login page when the credentials were rejected.
pub(crate) const LOGIN_FAILED_MARKER: &str = "Login failed";

pub(crate) const LOGIN_EMAIL_FIELD: &str = "login.Email";
pub(crate) const LOGIN_PASSWORD_FIELD: &str = "login.Password";

pub(crate) const LOGIN_ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.9,es;q=0.8";
pub(crate) const BASKET_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub(crate) const BASKET_ACCEPT_ENCODING: &str = "gzip, deflate, sdch, br";
pub(crate) const BASKET_ACCEPT_LANGUAGE: &str = "en,fr-FR;q=0.8,fr;q=0.6,en-US;q=0.4";
