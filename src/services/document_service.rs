// src/services/document_service.rs

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use genpdf::{elements, style, Alignment, Element};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        format::{format_date, format_date_long, format_montant, or_placeholder, NA, NON_RENSEIGNE, NON_SPECIFIE},
    },
    db::{AllocationRepository, DossierRepository, EtudiantRepository, PayementRepository},
    models::{
        allocation::AllocationLigne,
        dossier::DossierDetail,
        etudiant::{Etudiant, Genre},
        payement::Payement,
    },
};

const EN_TETE: [&str; 6] = [
    "RÉPUBLIQUE DU SÉNÉGAL",
    "Un Peuple, Un but, Une Foi",
    "MINISTÈRE DE L'ENSEIGNEMENT SUPÉRIEUR",
    "CENTRE RÉGIONAL DES ŒUVRES UNIVERSITAIRES",
    "CROUS - ZIGUINCHOR",
    "SERVICE DE L'HEBERGEMENT",
];
const TITRE: &str = "FICHE DE DOSSIER RÉSIDENT";
const MENTION_AFFECTATION: &str = "Cette affectation est personnelle et ne peut être cédée. Le non-respect des conditions générales d'occupation peut entraîner la résiliation du contrat.";
const MENTION_MATERIEL: &str = "NB: Le matériel doit être restitué à la fin de l'année universitaire dans l'état dans lequel il a été alloué. Tout matériel manquant ou dégradé sera facturé à l'étudiant.";
const AUCUN_PAIEMENT: &str = "Aucun paiement enregistré";
const AUCUN_MATERIEL: &str = "Aucun matériel alloué";

/// Conteúdo textual da ficha, já formatado. A montagem é pura; o genpdf só desenha.
#[derive(Debug, Clone, PartialEq)]
pub struct DossierSheet {
    pub numero: String,
    pub reference: String,
    pub ncs: String,
    pub annee: String,
    /// Descrição, montante, observação
    pub finances: Vec<[String; 3]>,
    pub identite: Vec<(String, String)>,
    pub reference_attribution: String,
    /// Campus, pavillon, chambre, data de atribuição
    pub affectation: [String; 4],
    pub nombre_paiements: usize,
    pub total_paye: String,
    /// Mês, fatura, data, montante
    pub paiements: Vec<[String; 4]>,
    /// N°, artigo, quantidade, estado, data
    pub allocations: Vec<[String; 5]>,
    pub fait_le: String,
    pub qr_payload: String,
}

pub fn build_sheet(
    dossier: &DossierDetail,
    etudiant: &Etudiant,
    payements: &[Payement],
    allocations: &[AllocationLigne],
    today: NaiveDate,
) -> DossierSheet {
    let numero = or_placeholder(Some(dossier.numero.as_str()), NA).to_string();
    let annee = dossier.annee_universitaire.nom.clone();
    let annuel = dossier.taux_loyer_mensuelle * Decimal::from(12) + dossier.caution;

    let genre = match etudiant.genre {
        Some(Genre::H) => "Masculin",
        Some(Genre::F) => "Féminin",
        None => NON_SPECIFIE,
    };
    let identite = [
        ("NOM", Some(etudiant.nom.as_str())),
        ("PRÉNOM", Some(etudiant.prenom.as_str())),
        ("CNI", etudiant.cni.as_deref()),
        ("NCS", Some(etudiant.ncs.as_str())),
        ("TÉLÉPHONE", etudiant.telephone.as_deref()),
        ("EMAIL", etudiant.email.as_deref()),
    ]
    .into_iter()
    .map(|(label, v)| (label.to_string(), or_placeholder(v, NON_RENSEIGNE).to_string()))
    .chain(std::iter::once(("GENRE".to_string(), genre.to_string())))
    .collect();

    let total: Decimal = payements.iter().map(|p| p.montant).sum();
    let paiements = payements
        .iter()
        .map(|p| {
            [
                p.mois.label().to_string(),
                or_placeholder(Some(p.numero_facture.as_str()), NA).to_string(),
                format_date(p.created_at.date_naive()),
                format!("{} FCFA", format_montant(p.montant)),
            ]
        })
        .collect();

    let allocations = allocations
        .iter()
        .enumerate()
        .map(|(i, a)| {
            [
                (i + 1).to_string(),
                a.equipement_nom.clone(),
                a.nombre.to_string(),
                a.etat.label().to_string(),
                format_date(a.date),
            ]
        })
        .collect();

    DossierSheet {
        reference: format!("Réf: {}-{}", numero, today.year()),
        ncs: format!("NCS: {}", or_placeholder(Some(etudiant.ncs.as_str()), NA)),
        finances: vec![
            [
                "Caution versée".into(),
                format_montant(dossier.caution),
                "Payable une fois".into(),
            ],
            [
                "Loyer mensuel".into(),
                format_montant(dossier.taux_loyer_mensuelle),
                "Payable mensuellement".into(),
            ],
            [
                "Total annuel estimé".into(),
                format_montant(annuel),
                "Caution + (Loyer × 12)".into(),
            ],
        ],
        identite,
        reference_attribution: format!("FICHE D'ATTRIBUTION - RÉFÉRENCE: {}/{}", numero, annee),
        affectation: [
            dossier.chambre.pavillon.campus.nom.clone(),
            dossier.chambre.pavillon.nom.clone(),
            dossier.chambre.nom.clone(),
            format_date(dossier.created_at.date_naive()),
        ],
        nombre_paiements: payements.len(),
        total_paye: format!("{} FCFA", format_montant(total)),
        paiements,
        allocations,
        fait_le: format!("Fait à Ziguinchor, le {}", format_date_long(today)),
        qr_payload: format!("DOSSIER:{}|ETUDIANT:{}", numero, etudiant.ncs),
        numero,
        annee,
    }
}

#[derive(Clone)]
pub struct DocumentService {
    pool: PgPool,
    dossier_repo: DossierRepository,
    etudiant_repo: EtudiantRepository,
    payement_repo: PayementRepository,
    allocation_repo: AllocationRepository,
    fonts_dir: PathBuf,
    font_family: String,
}

impl DocumentService {
    pub fn new(
        pool: PgPool,
        dossier_repo: DossierRepository,
        etudiant_repo: EtudiantRepository,
        payement_repo: PayementRepository,
        allocation_repo: AllocationRepository,
        fonts_dir: PathBuf,
        font_family: String,
    ) -> Self {
        Self { pool, dossier_repo, etudiant_repo, payement_repo, allocation_repo, fonts_dir, font_family }
    }

    /// Gera a ficha PDF; devolve o número do dossier (para o nome do arquivo) e os bytes.
    pub async fn generate_dossier_pdf(&self, dossier_id: Uuid) -> Result<(String, Vec<u8>), AppError> {
        let dossier = self
            .dossier_repo
            .find_detail(&self.pool, dossier_id)
            .await?
            .ok_or(AppError::NotFound("Dossier"))?;

        let etudiant = self
            .etudiant_repo
            .find_by_id(dossier.etudiant_id)
            .await?
            .ok_or(AppError::NotFound("Étudiant"))?;
        let payements = self.payement_repo.list_by_dossier(dossier.id).await?;
        let lignes = self.allocation_repo.lignes_for_dossier(&self.pool, dossier.id).await?;

        let sheet = build_sheet(&dossier, &etudiant, &payements, &lignes, Local::now().date_naive());
        let numero = sheet.numero.clone();

        // genpdf é síncrono e pesado: fora do executor
        let fonts_dir = self.fonts_dir.clone();
        let family = self.font_family.clone();
        let bytes = tokio::task::spawn_blocking(move || render_sheet(&sheet, &fonts_dir, &family))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de renderização do PDF: {}", e))??;

        tracing::info!("PDF du dossier {} généré ({} octets)", numero, bytes.len());
        Ok((numero, bytes))
    }
}

fn pdf_err(e: impl std::fmt::Display) -> AppError {
    AppError::PdfError(e.to_string())
}

fn section(doc: &mut genpdf::Document, titre: &str) {
    doc.push(elements::Break::new(1.5));
    doc.push(elements::Paragraph::new(titre).styled(style::Style::new().bold().with_font_size(13)));
    doc.push(elements::Break::new(0.5));
}

fn table(widths: Vec<usize>, header: &[&str], rows: &[Vec<String>]) -> Result<elements::TableLayout, AppError> {
    let mut table = elements::TableLayout::new(widths);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let bold = style::Style::new().bold();
    let mut row = table.row();
    for h in header {
        row.push_element(elements::Paragraph::new(*h).styled(bold));
    }
    row.push().map_err(pdf_err)?;

    for cells in rows {
        let mut row = table.row();
        for cell in cells {
            row.push_element(elements::Paragraph::new(cell.as_str()));
        }
        row.push().map_err(pdf_err)?;
    }
    Ok(table)
}

pub fn render_sheet(sheet: &DossierSheet, fonts_dir: &Path, family: &str) -> Result<Vec<u8>, AppError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, family, None)
        .map_err(|e| AppError::FontNotFound(format!("{} ({}): {}", family, fonts_dir.display(), e)))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Dossier {}", sheet.numero));
    doc.set_font_size(10);
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- En-tête officiel ---
    for (i, ligne) in EN_TETE.iter().enumerate() {
        let s = if i == 1 { style::Style::new().italic() } else { style::Style::new().bold() };
        let mut p = elements::Paragraph::new(*ligne);
        p.set_alignment(Alignment::Center);
        doc.push(p.styled(s));
    }
    for ligne in [&sheet.reference, &sheet.ncs] {
        let mut p = elements::Paragraph::new(ligne.as_str());
        p.set_alignment(Alignment::Right);
        doc.push(p.styled(style::Style::new().with_font_size(8)));
    }

    doc.push(elements::Break::new(1.5));
    let mut titre = elements::Paragraph::new(TITRE);
    titre.set_alignment(Alignment::Center);
    doc.push(titre.styled(style::Style::new().bold().with_font_size(18)));
    let mut annee = elements::Paragraph::new(format!("Année Universitaire: {}", sheet.annee));
    annee.set_alignment(Alignment::Center);
    doc.push(annee);

    section(&mut doc, "INFORMATIONS ADMINISTRATIVES");
    doc.push(
        elements::Paragraph::new(format!("N° ENREGISTREMENT: {}", sheet.numero))
            .styled(style::Style::new().bold()),
    );

    section(&mut doc, "INFORMATIONS FINANCIÈRES");
    let finances: Vec<Vec<String>> = sheet.finances.iter().map(|r| r.to_vec()).collect();
    doc.push(table(vec![4, 3, 3], &["Description", "Montant (FCFA)", "Observations"], &finances)?);

    section(&mut doc, "FICHE D'IDENTIFICATION DE L'ÉTUDIANT");
    let identite: Vec<Vec<String>> = sheet
        .identite
        .iter()
        .map(|(k, v)| vec![k.clone(), v.clone()])
        .collect();
    let mut ident = elements::TableLayout::new(vec![1, 3]);
    ident.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
    for cells in &identite {
        ident
            .row()
            .element(elements::Paragraph::new(cells[0].as_str()).styled(style::Style::new().bold()))
            .element(elements::Paragraph::new(cells[1].as_str()))
            .push()
            .map_err(pdf_err)?;
    }
    doc.push(ident);

    section(&mut doc, "AFFECTATION DE LOGEMENT");
    doc.push(elements::Paragraph::new(sheet.reference_attribution.as_str()).styled(style::Style::new().bold()));
    doc.push(elements::Break::new(0.5));
    doc.push(table(
        vec![1, 1, 1, 1],
        &["CAMPUS", "PAVILLON", "CHAMBRE", "DATE D'ATTRIBUTION"],
        &[sheet.affectation.to_vec()],
    )?);
    doc.push(elements::Paragraph::new(MENTION_AFFECTATION).styled(style::Style::new().italic().with_font_size(8)));

    section(&mut doc, "SITUATION FINANCIÈRE");
    doc.push(elements::Paragraph::new(format!("Nombre de paiements: {}", sheet.nombre_paiements)));
    doc.push(elements::Paragraph::new(format!("Montant total payé: {}", sheet.total_paye)));
    doc.push(elements::Break::new(0.5));
    if sheet.paiements.is_empty() {
        doc.push(elements::Paragraph::new(AUCUN_PAIEMENT).styled(style::Style::new().italic()));
    } else {
        let rows: Vec<Vec<String>> = sheet.paiements.iter().map(|r| r.to_vec()).collect();
        doc.push(table(vec![2, 3, 2, 3], &["Mois", "N° Facture", "Date", "Montant"], &rows)?);
    }

    section(&mut doc, "ALLOCATIONS DE MATÉRIEL");
    if sheet.allocations.is_empty() {
        doc.push(elements::Paragraph::new(AUCUN_MATERIEL).styled(style::Style::new().italic()));
    } else {
        let rows: Vec<Vec<String>> = sheet.allocations.iter().map(|r| r.to_vec()).collect();
        doc.push(table(
            vec![1, 4, 1, 2, 2],
            &["N°", "Article", "Qté", "État", "Date d'allocation"],
            &rows,
        )?);
    }
    doc.push(elements::Paragraph::new(MENTION_MATERIEL).styled(style::Style::new().italic().with_font_size(8)));

    // --- Signature ---
    doc.push(elements::Break::new(2));
    for ligne in [sheet.fait_le.as_str(), "Le Chef de la division"] {
        let mut p = elements::Paragraph::new(ligne);
        p.set_alignment(Alignment::Right);
        doc.push(p.styled(style::Style::new().bold()));
    }

    // --- QR code ---
    let code = QrCode::new(sheet.qr_payload.as_bytes()).map_err(pdf_err)?;
    let image_buffer = code.render::<Luma<u8>>().build();
    let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);
    let qr = elements::Image::from_dynamic_image(dynamic_image)
        .map_err(pdf_err)?
        .with_alignment(Alignment::Center)
        .with_scale(genpdf::Scale::new(0.5, 0.5));
    doc.push(elements::Break::new(1));
    doc.push(qr);

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_err)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        allocation::EtatMateriel,
        dossier::{AnneeRef, CampusRef, ChambreRef, EtudiantRef, PavillonRef},
        payement::Mois,
    };
    use chrono::{TimeZone, Utc};

    fn fixtures() -> (DossierDetail, Etudiant) {
        let etudiant = Etudiant {
            id: Uuid::new_v4(),
            nom: "Sagna".into(),
            prenom: "Khady".into(),
            ncs: "2022Z0107".into(),
            cni: None,
            email: Some("khady@univ-zig.sn".into()),
            telephone: Some("   ".into()),
            avatar: None,
            genre: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let dossier = DossierDetail {
            id: Uuid::new_v4(),
            numero: "DOS-000042".into(),
            chambre: ChambreRef {
                id: Uuid::new_v4(),
                nom: "B-12".into(),
                places: 2,
                pavillon: PavillonRef {
                    id: Uuid::new_v4(),
                    nom: "Pavillon B".into(),
                    campus: CampusRef { id: Uuid::new_v4(), nom: "Diabir".into() },
                },
            },
            etudiant_id: etudiant.id,
            etudiant: EtudiantRef {
                id: etudiant.id,
                nom: etudiant.nom.clone(),
                prenom: etudiant.prenom.clone(),
                ncs: etudiant.ncs.clone(),
                genre: None,
            },
            annee_universitaire: AnneeRef { id: Uuid::new_v4(), nom: "2024-2025".into() },
            active: true,
            caution: Decimal::from(15000),
            taux_loyer_mensuelle: Decimal::from(3000),
            created_at: Utc.with_ymd_and_hms(2024, 10, 7, 9, 0, 0).unwrap(),
            updated_at: Utc::now(),
        };
        (dossier, etudiant)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn sheet_header_and_finances() {
        let (dossier, etudiant) = fixtures();
        let sheet = build_sheet(&dossier, &etudiant, &[], &[], today());

        assert_eq!(sheet.reference, "Réf: DOS-000042-2025");
        assert_eq!(sheet.ncs, "NCS: 2022Z0107");
        assert_eq!(sheet.annee, "2024-2025");
        assert_eq!(sheet.finances[0][1], "15 000");
        assert_eq!(sheet.finances[1][1], "3 000");
        // 3000 × 12 + 15000
        assert_eq!(sheet.finances[2][1], "51 000");
        assert_eq!(sheet.fait_le, "Fait à Ziguinchor, le 05 mars 2025");
        assert_eq!(sheet.qr_payload, "DOSSIER:DOS-000042|ETUDIANT:2022Z0107");
    }

    #[test]
    fn missing_identity_fields_use_placeholders() {
        let (dossier, etudiant) = fixtures();
        let sheet = build_sheet(&dossier, &etudiant, &[], &[], today());
        let get = |k: &str| sheet.identite.iter().find(|(l, _)| l == k).map(|(_, v)| v.as_str());

        assert_eq!(get("CNI"), Some("NON RENSEIGNÉ"));
        assert_eq!(get("TÉLÉPHONE"), Some("NON RENSEIGNÉ"));
        assert_eq!(get("EMAIL"), Some("khady@univ-zig.sn"));
        assert_eq!(get("GENRE"), Some("Non spécifié"));
    }

    #[test]
    fn room_assignment_and_empty_histories() {
        let (dossier, etudiant) = fixtures();
        let sheet = build_sheet(&dossier, &etudiant, &[], &[], today());

        assert_eq!(sheet.affectation, [
            "Diabir".to_string(),
            "Pavillon B".to_string(),
            "B-12".to_string(),
            "07/10/2024".to_string(),
        ]);
        assert_eq!(sheet.reference_attribution, "FICHE D'ATTRIBUTION - RÉFÉRENCE: DOS-000042/2024-2025");
        assert_eq!(sheet.nombre_paiements, 0);
        assert_eq!(sheet.total_paye, "0 FCFA");
        assert!(sheet.paiements.is_empty());
        assert!(sheet.allocations.is_empty());
    }

    #[test]
    fn payments_and_allocations_are_listed() {
        let (dossier, etudiant) = fixtures();
        let payements = vec![
            Payement {
                id: Uuid::new_v4(),
                dossier_id: dossier.id,
                montant: Decimal::from(3000),
                mois: Mois::Octobre,
                numero_facture: "FAC-001".into(),
                created_at: Utc.with_ymd_and_hms(2024, 10, 10, 8, 0, 0).unwrap(),
                updated_at: Utc::now(),
            },
            Payement {
                id: Uuid::new_v4(),
                dossier_id: dossier.id,
                montant: Decimal::from(3000),
                mois: Mois::Novembre,
                numero_facture: "FAC-002".into(),
                created_at: Utc.with_ymd_and_hms(2024, 11, 4, 8, 0, 0).unwrap(),
                updated_at: Utc::now(),
            },
        ];
        let lignes = vec![AllocationLigne {
            equipement_nom: "Matelas".into(),
            nombre: 1,
            etat: EtatMateriel::Deteriore,
            date: NaiveDate::from_ymd_opt(2024, 10, 8).unwrap(),
            constatation: None,
        }];

        let sheet = build_sheet(&dossier, &etudiant, &payements, &lignes, today());

        assert_eq!(sheet.nombre_paiements, 2);
        assert_eq!(sheet.total_paye, "6 000 FCFA");
        assert_eq!(sheet.paiements[0], [
            "OCTOBRE".to_string(),
            "FAC-001".to_string(),
            "10/10/2024".to_string(),
            "3 000 FCFA".to_string(),
        ]);
        assert_eq!(sheet.allocations[0][0], "1");
        assert_eq!(sheet.allocations[0][1], "Matelas");
        assert_eq!(sheet.allocations[0][3], "DÉTÉRIORÉ");
        assert_eq!(sheet.allocations[0][4], "08/10/2024");
    }

    #[test]
    fn missing_fonts_are_reported() {
        let (dossier, etudiant) = fixtures();
        let sheet = build_sheet(&dossier, &etudiant, &[], &[], today());
        let result = render_sheet(&sheet, Path::new("/nonexistent/fonts"), "Roboto");
        assert!(matches!(result, Err(AppError::FontNotFound(_))));
    }
}
