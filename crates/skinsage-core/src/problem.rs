//! Skin-problem identity and the problem → target-effects mapping.
//!
//! One canonical enumeration covers both the classifier's output classes
//! and every lookup key in the system. Display metadata is keyed on the
//! enum explicitly rather than on a second, loosely-related string set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The seven skin-condition classes, in the classifier's fixed output
/// order. The discriminant order is load-bearing: `SkinProblem::ALL[i]`
/// must correspond to index `i` of the model's probability vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinProblem {
    /// Acne.
    Jerawat,
    /// Dry or dehydrated skin.
    KulitKeringDehidrasi,
    /// Dull skin or dark spots.
    KulitKusamNodaHitam,
    /// Sensitive or irritated skin.
    KulitSensitifIritasi,
    /// Enlarged pores.
    PoriPoriBesar,
    /// Excess oil production.
    ProduksiMinyakBerlebih,
    /// Signs of aging.
    TandaTandaPenuaan,
}

#[derive(Error, Debug)]
#[error("unknown skin problem: {0}")]
pub struct UnknownProblem(pub String);

impl SkinProblem {
    /// All problems, in classifier output order.
    pub const ALL: [SkinProblem; 7] = [
        SkinProblem::Jerawat,
        SkinProblem::KulitKeringDehidrasi,
        SkinProblem::KulitKusamNodaHitam,
        SkinProblem::KulitSensitifIritasi,
        SkinProblem::PoriPoriBesar,
        SkinProblem::ProduksiMinyakBerlebih,
        SkinProblem::TandaTandaPenuaan,
    ];

    /// The underscored identifier the classifier emits.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinProblem::Jerawat => "jerawat",
            SkinProblem::KulitKeringDehidrasi => "kulit_kering_dehidrasi",
            SkinProblem::KulitKusamNodaHitam => "kulit_kusam_noda_hitam",
            SkinProblem::KulitSensitifIritasi => "kulit_sensitif_iritasi",
            SkinProblem::PoriPoriBesar => "pori_pori_besar",
            SkinProblem::ProduksiMinyakBerlebih => "produksi_minyak_berlebih",
            SkinProblem::TandaTandaPenuaan => "tanda_tanda_penuaan",
        }
    }

    /// Canonical effects relevant to this problem. Scoring treats these
    /// case-insensitively, so casing here is display-oriented.
    pub fn target_effects(&self) -> &'static [&'static str] {
        match self {
            SkinProblem::Jerawat => &["Acne-Free", "Anti-Acne", "Soothing"],
            SkinProblem::KulitKeringDehidrasi => {
                &["Moisturizing", "Hydrating", "Deep Moisture"]
            }
            SkinProblem::KulitKusamNodaHitam => &[
                "Brightening",
                "Glowing",
                "Whitening",
                "UV-Protection",
                "Even Skin Tone",
            ],
            SkinProblem::KulitSensitifIritasi => &["Soothing", "Calming", "Anti-Redness"],
            SkinProblem::PoriPoriBesar => &["Pore-Care", "Minimizing Pores"],
            SkinProblem::ProduksiMinyakBerlebih => {
                &["Oil Control", "Balancing", "Sebum Control"]
            }
            SkinProblem::TandaTandaPenuaan => &["Anti-Aging", "Firming", "Wrinkle Care"],
        }
    }

    /// Descriptive metadata for informational display.
    pub fn info(&self) -> ProblemInfo {
        match self {
            SkinProblem::Jerawat => ProblemInfo {
                description: "Merupakan kondisi peradangan pada kulit akibat pori-pori yang \
                    tersumbat oleh minyak (sebum), sel kulit mati, dan bakteri. Secara visual, \
                    ditandai dengan munculnya bintik merah, pustula, papula, atau komedo di \
                    area wajah.",
                image_url: "https://raw.githubusercontent.com/deayulianis/Penelitian-Ilmiah/refs/heads/main/acne_face_8.PNG",
            },
            SkinProblem::KulitKeringDehidrasi => ProblemInfo {
                description: "Ciri visualnya meliputi tekstur kulit yang kasar, bersisik, \
                    terlihat pecah-pecah, dan mudah mengelupas. Kondisi ini disebabkan oleh \
                    kurangnya kadar air dalam lapisan kulit dan bisa dipicu oleh cuaca dingin, \
                    kurangnya kelembapan, atau sabun yang terlalu keras.",
                image_url: "https://raw.githubusercontent.com/deayulianis/Penelitian-Ilmiah/refs/heads/main/dry_skin_face_2.jpeg",
            },
            SkinProblem::KulitKusamNodaHitam => ProblemInfo {
                description: "Ciri utamanya adalah warna kulit yang tidak merata, tampak gelap, \
                    lelah, atau kurang bercahaya. Hal ini biasanya disebabkan oleh penumpukan \
                    sel kulit mati, paparan sinar matahari, kurang hidrasi, atau polusi \
                    lingkungan.",
                image_url: "https://raw.githubusercontent.com/deayulianis/Penelitian-Ilmiah/refs/heads/main/dull_skin_face_22.jpg",
            },
            SkinProblem::KulitSensitifIritasi => ProblemInfo {
                description: "Ditandai dengan kemerahan, rasa gatal, perih, atau peradangan \
                    setelah penggunaan produk tertentu atau akibat faktor lingkungan. Kulit \
                    sensitif tampak lebih tipis dan mudah bereaksi terhadap zat aktif atau \
                    cuaca ekstrem.",
                image_url: "https://raw.githubusercontent.com/deayulianis/Penelitian-Ilmiah/refs/heads/main/sensitive_or_irritated_skin_face_1.jpg",
            },
            SkinProblem::PoriPoriBesar => ProblemInfo {
                description: "Ditandai dengan tampilan pori-pori kulit wajah yang terlihat \
                    lebih besar atau terbuka dari biasanya. Umumnya terlihat di area hidung, \
                    pipi, atau dahi, dan sering kali disebabkan oleh produksi minyak berlebih, \
                    penuaan, atau faktor genetik.",
                image_url: "https://raw.githubusercontent.com/deayulianis/Penelitian-Ilmiah/refs/heads/main/large_pores_face_15.jpg",
            },
            SkinProblem::ProduksiMinyakBerlebih => ProblemInfo {
                description: "Ditunjukkan oleh permukaan wajah yang tampak mengilap, terutama \
                    di area T-zone (dahi, hidung, dan dagu). Hal ini disebabkan oleh aktivitas \
                    kelenjar sebaceous yang memproduksi sebum dalam jumlah berlebihan.",
                image_url: "https://raw.githubusercontent.com/deayulianis/Penelitian-Ilmiah/refs/heads/main/oily_skin_face_50.jpg",
            },
            SkinProblem::TandaTandaPenuaan => ProblemInfo {
                description: "Ditandai dengan munculnya kerutan halus, garis-garis wajah, atau \
                    flek hitam. Gejala ini umumnya muncul seiring bertambahnya usia atau akibat \
                    paparan sinar UV dalam jangka panjang yang merusak struktur kolagen kulit.",
                image_url: "https://raw.githubusercontent.com/deayulianis/Penelitian-Ilmiah/refs/heads/main/signs_of_aging_face_4.jpg",
            },
        }
    }
}

impl FromStr for SkinProblem {
    type Err = UnknownProblem;

    /// Parse the underscored identifier, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        SkinProblem::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == id)
            .ok_or_else(|| UnknownProblem(s.to_string()))
    }
}

impl fmt::Display for SkinProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable description and illustrative image for one problem.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemInfo {
    pub description: &'static str,
    pub image_url: &'static str,
}
