#[derive(Clone, Default, Debug)]
pub enum State {
    #[default]
    Start,
    AwaitingRecipientAddress,
    AwaitingAmount {
        recipient: String,
    },
    AwaitingConfirmation {
        recipient: String,
        amount: f64,
        token: String,
    },
    AwaitingAlphaEmail,
    AwaitingAlphaOtp {
        email: String,
    },
    AwaitingKycFullName,
    AwaitingKycPhone {
        full_name: String,
    },
    AwaitingKycDob {
        full_name: String,
        phone: String,
    },
}
